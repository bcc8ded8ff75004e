mod memory;
mod postgres;
pub(crate) mod sql;

pub use memory::{CompanyRow, MemoryStorage, TickerRow};
pub use postgres::PgStorage;

use crate::error::StorageError;
use crate::fetcher::Company;
use crate::seeds::STATEMENT_HEADERS;
use async_trait::async_trait;

/// Persistence for the seeding pipeline.
///
/// Every write is all-or-nothing: a failed call leaves no rows behind.
#[async_trait]
pub trait Storage: Send {
    /// Create every table in one go. Fails if any of them already exists.
    async fn initialize_schema(&mut self) -> Result<(), StorageError>;

    /// Insert the company and one `ticker` row per (ticker, exchange) pair, returning the new
    /// company id.
    async fn insert_company(&mut self, company: &Company) -> Result<i32, StorageError>;

    async fn insert_header(&mut self, header: &Header) -> Result<(), StorageError>;
}

/// Ordered keywords naming one kind of financial statement, e.g. `["balance", "sheet"]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Header(Vec<String>);

impl Header {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keywords.into_iter().map(Into::into).collect())
    }

    /// The statement headers every fresh schema is seeded with.
    pub fn statements() -> Vec<Self> {
        STATEMENT_HEADERS
            .iter()
            .map(|keywords| Self::new(keywords.iter().copied()))
            .collect()
    }

    pub fn keywords(&self) -> &[String] {
        &self.0
    }
}

/// Pair tickers with exchanges, rejecting companies where either list is missing or the
/// lengths differ.
pub(crate) fn ticker_pairs(company: &Company) -> Result<Vec<(&str, &str)>, StorageError> {
    let (tickers, exchanges) = match (&company.tickers, &company.exchanges) {
        (Some(tickers), Some(exchanges)) => (tickers, exchanges),
        _ => {
            return Err(StorageError::CorruptData(format!(
                "{} (CIK {}) is missing tickers or exchanges",
                company.name, company.cik
            )))
        }
    };

    if tickers.len() != exchanges.len() {
        return Err(StorageError::CorruptData(format!(
            "{} (CIK {}) has {} tickers but {} exchanges",
            company.name,
            company.cik,
            tickers.len(),
            exchanges.len()
        )));
    }

    Ok(tickers
        .iter()
        .zip(exchanges)
        .map(|(ticker, exchange)| (ticker.as_str(), exchange.as_str()))
        .collect())
}
