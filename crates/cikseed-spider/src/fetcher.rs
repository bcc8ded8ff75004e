use crate::cik::{canon, de_cik, Cik, CIK_LEN};
use crate::error::FetchError;
use crate::http::*;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

/// Base of the SEC submissions endpoint; documents live at `{base}/CIK##########.json`.
pub const SUBMISSIONS_URL: &str = "https://data.sec.gov/submissions";

/// The SEC allows 10 requests per second; 150ms keeps well under it.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(150);

// upper bound on a server-requested pause
const MAX_HOLD: Duration = Duration::from_secs(600);

/// Company metadata decoded from one submissions document, with its CIK canonicalized.
///
/// `tickers[i]` trades on `exchanges[i]`. Either list may be missing upstream, which is only
/// rejected when the company is persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub cik: Cik,
    pub tickers: Option<Vec<String>>,
    pub exchanges: Option<Vec<String>>,
}

/// Looks up the metadata for one CIK.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, cik: &str) -> Result<Company, FetchError>;
}

// de
// ----------------------------------------------------------------------------

// The submissions document carries far more (filings, addresses, SIC codes, ...); only the
// identity fields are kept.
#[derive(Debug, Deserialize)]
struct Submissions {
    name: String,
    #[serde(deserialize_with = "de_cik")]
    cik: String,
    #[serde(default)]
    tickers: Option<Vec<String>>,
    #[serde(default)]
    exchanges: Option<Vec<String>>,
}

/// Decode a submissions document fetched for `requested`.
///
/// The CIK inside the document is padded back to 10 digits (the SEC serves `"320193"` for
/// `"0000320193"`), whatever padding `requested` had.
pub fn decode_company(requested: &str, body: &[u8]) -> Result<Company, FetchError> {
    let decode = |reason: String| FetchError::Decode {
        cik: requested.to_string(),
        reason,
    };

    let de: Submissions = serde_json::from_slice(body).map_err(|err| decode(err.to_string()))?;
    let cik = Cik::parse(&de.cik).map_err(|err| decode(err.to_string()))?;

    Ok(Company {
        name: de.name,
        cik,
        tickers: de.tickers,
        exchanges: de.exchanges,
    })
}

// throttle
// ----------------------------------------------------------------------------

/// Fixed pause before every request, stretched once when the server answers with a
/// `Retry-After` hint.
#[derive(Debug)]
pub struct Throttle {
    delay: Duration,
    hold_until: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            hold_until: Mutex::new(None),
        }
    }

    /// How long the next request has to wait.
    pub fn next_wait(&self) -> Duration {
        let hold_until = *self
            .hold_until
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let hold = hold_until
            .map(|until| until.saturating_duration_since(Instant::now()))
            .unwrap_or_default();
        self.delay + hold
    }

    /// Sleep for [`Throttle::next_wait`], consuming any outstanding hold.
    pub async fn wait(&self) {
        let wait = self.next_wait();
        *self
            .hold_until
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        tokio::time::sleep(wait).await;
    }

    /// Record a `Retry-After` (in seconds) sent with a 429 or 503. Returns the hold applied.
    pub fn observe(&self, status: StatusCode, headers: &HeaderMap) -> Option<Duration> {
        if status != StatusCode::TOO_MANY_REQUESTS && status != StatusCode::SERVICE_UNAVAILABLE {
            return None;
        }

        let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
        let hold = match value.trim().parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs).min(MAX_HOLD),
            Err(_) => {
                debug!("ignoring non-numeric Retry-After {value:?}");
                return None;
            }
        };

        *self
            .hold_until
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Instant::now() + hold);
        Some(hold)
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

// fetch
// ----------------------------------------------------------------------------

/// Fetches `CIK##########.json` documents from the SEC submissions API, one at a time.
#[derive(Debug)]
pub struct SecFetcher {
    client: HttpClient,
    base_url: String,
    throttle: Throttle,
}

impl SecFetcher {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: SUBMISSIONS_URL.to_string(),
            throttle: Throttle::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.throttle = Throttle::new(delay);
        self
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Short all-digit CIKs are padded for the path; anything else is sent untouched.
    pub fn url_for(&self, cik: &str) -> String {
        let token = if cik.len() <= CIK_LEN && cik.bytes().all(|b| b.is_ascii_digit()) {
            canon(cik)
        } else {
            cik.to_string()
        };
        format!("{}/CIK{token}.json", self.base_url)
    }
}

#[async_trait]
impl MetadataFetcher for SecFetcher {
    async fn fetch(&self, cik: &str) -> Result<Company, FetchError> {
        let url = self.url_for(cik);
        let transport = |source: reqwest::Error| FetchError::Transport {
            cik: cik.to_string(),
            source,
        };

        self.throttle.wait().await;
        trace!("GET {url}");
        let response = self.client.get(&url).send().await.map_err(transport)?;

        let status = response.status();
        if let Some(hold) = self.throttle.observe(status, response.headers()) {
            warn!("SEC answered {status} for CIK {cik}; pausing {hold:?} before the next request");
        }

        // the body is read in full on every path, so the connection goes back to the pool
        let body = response.bytes().await.map_err(transport)?;
        trace!("received {} bytes for CIK {cik} ({status})", body.len());

        decode_company(cik, &body)
    }
}
