/// Canonical form and validation of SEC Central Index Keys.
pub mod cik;

/// Arena-backed HTML document tree with non-recursive traversal.
pub mod dom;

pub mod error;

/// Per-CIK company metadata from the [SEC submissions API].
///
/// [SEC submissions API]: https://www.sec.gov/search-filings/edgar-application-programming-interfaces
pub mod fetcher;

pub mod ingest;

/// Sources of candidate CIKs: the static seed list, or the S&P 500 constituents table.
pub mod resolver;

/// Static seed data; the S&P 500 CIK list and the financial statement header keywords.
pub mod seeds;

pub mod storage;

/// Shortcut for required API elements.
pub mod http {
    pub use reqwest::Client as HttpClient;
    pub use tokio_postgres::Client as PgClient;

    use reqwest::header::{self, HeaderMap, HeaderValue};
    use std::time::Duration;

    /// Build the client shared by the scraper and the metadata fetcher.
    ///
    /// The SEC rejects anonymous traffic, so every request carries the contact-identifying
    /// `user_agent`, alongside `Accept: */*` and `Connection: keep-alive`.
    pub fn build_client(
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> Result<HttpClient, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

        let mut builder = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

/// Format the time elapsed since `time`, for trailing log messages.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:?}", time.elapsed())
}
