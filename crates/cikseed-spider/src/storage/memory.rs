use super::{ticker_pairs, Header, Storage};
use crate::error::StorageError;
use crate::fetcher::Company;
use async_trait::async_trait;
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyRow {
    pub id: i32,
    pub name: String,
    pub cik: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickerRow {
    pub id: i32,
    pub company_id: i32,
    pub value: String,
    pub exchange: String,
}

/// In-memory [`Storage`] enforcing the same uniqueness rules as the PostgreSQL schema, for
/// tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    initialized: bool,
    companies: Vec<CompanyRow>,
    tickers: Vec<TickerRow>,
    headers: Vec<Header>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn companies(&self) -> &[CompanyRow] {
        &self.companies
    }

    pub fn tickers(&self) -> &[TickerRow] {
        &self.tickers
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    fn ensure_schema(&self) -> Result<(), StorageError> {
        if self.initialized {
            Ok(())
        } else {
            Err(StorageError::Schema("schema has not been created".to_string()))
        }
    }
}

fn violation(constraint: &str, detail: String) -> StorageError {
    StorageError::ConstraintViolation {
        constraint: constraint.to_string(),
        detail,
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize_schema(&mut self) -> Result<(), StorageError> {
        if self.initialized {
            return Err(StorageError::Schema(
                "relation \"company\" already exists".to_string(),
            ));
        }
        self.initialized = true;
        Ok(())
    }

    async fn insert_company(&mut self, company: &Company) -> Result<i32, StorageError> {
        self.ensure_schema()?;
        let pairs = ticker_pairs(company)?;

        // every check runs before the first write
        if self.companies.iter().any(|row| row.name == company.name) {
            return Err(violation(
                "company_name_key",
                format!("Key (name)=({}) already exists.", company.name),
            ));
        }
        if self.companies.iter().any(|row| row.cik == company.cik.as_str()) {
            return Err(violation(
                "company_cik_key",
                format!("Key (cik)=({}) already exists.", company.cik),
            ));
        }
        for (i, (ticker, _)) in pairs.iter().enumerate() {
            let taken = self.tickers.iter().any(|row| row.value == *ticker)
                || pairs[..i].iter().any(|(earlier, _)| earlier == ticker);
            if taken {
                return Err(violation(
                    "ticker_value_key",
                    format!("Key (value)=({ticker}) already exists."),
                ));
            }
        }

        let id = self.companies.len() as i32 + 1;
        self.companies.push(CompanyRow {
            id,
            name: company.name.clone(),
            cik: company.cik.to_string(),
        });
        for (ticker, exchange) in pairs {
            let ticker_id = self.tickers.len() as i32 + 1;
            self.tickers.push(TickerRow {
                id: ticker_id,
                company_id: id,
                value: ticker.to_string(),
                exchange: exchange.to_string(),
            });
        }
        trace!("stored company {} [{}] as {id}", company.name, company.cik);

        Ok(id)
    }

    async fn insert_header(&mut self, header: &Header) -> Result<(), StorageError> {
        self.ensure_schema()?;
        if self.headers.contains(header) {
            return Err(violation(
                "header_values_key",
                format!("Key (values)=({:?}) already exists.", header.keywords()),
            ));
        }
        self.headers.push(header.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cik::Cik;

    fn company(name: &str, cik: &str, tickers: &[&str], exchanges: &[&str]) -> Company {
        Company {
            name: name.to_string(),
            cik: Cik::parse(cik).unwrap(),
            tickers: Some(tickers.iter().map(|t| t.to_string()).collect()),
            exchanges: Some(exchanges.iter().map(|e| e.to_string()).collect()),
        }
    }

    async fn storage() -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage.initialize_schema().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn schema_is_created_once() {
        let mut storage = storage().await;
        assert!(matches!(
            storage.initialize_schema().await,
            Err(StorageError::Schema(_))
        ));
    }

    #[tokio::test]
    async fn inserts_require_a_schema() {
        let mut storage = MemoryStorage::new();
        let apple = company("Apple Inc.", "320193", &["AAPL"], &["Nasdaq"]);
        assert!(matches!(
            storage.insert_company(&apple).await,
            Err(StorageError::Schema(_))
        ));
    }

    #[tokio::test]
    async fn mismatched_lists_are_corrupt() {
        let mut storage = storage().await;
        let apple = company("Apple Inc.", "320193", &["AAPL", "AAPL.B"], &["NASDAQ"]);
        assert!(matches!(
            storage.insert_company(&apple).await,
            Err(StorageError::CorruptData(_))
        ));
        assert!(storage.companies().is_empty());
        assert!(storage.tickers().is_empty());
    }

    #[tokio::test]
    async fn missing_lists_are_corrupt() {
        let mut storage = storage().await;
        let mut apple = company("Apple Inc.", "320193", &["AAPL"], &["NASDAQ"]);
        apple.exchanges = None;
        assert!(matches!(
            storage.insert_company(&apple).await,
            Err(StorageError::CorruptData(_))
        ));
    }

    #[tokio::test]
    async fn ticker_collision_leaves_no_company_behind() {
        let mut storage = storage().await;
        let alphabet = company("Alphabet Inc.", "1652044", &["GOOGL", "GOOG"], &["Nasdaq", "Nasdaq"]);
        storage.insert_company(&alphabet).await.unwrap();

        let imposter = company("Imposter", "1", &["ZZZ", "GOOG"], &["NYSE", "NYSE"]);
        match storage.insert_company(&imposter).await {
            Err(StorageError::ConstraintViolation { constraint, .. }) => {
                assert_eq!(constraint, "ticker_value_key")
            }
            other => panic!("expected a constraint violation, got {other:?}"),
        }
        assert_eq!(storage.companies().len(), 1);
        assert_eq!(storage.tickers().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_cik_and_name() {
        let mut storage = storage().await;
        storage
            .insert_company(&company("3M", "66740", &["MMM"], &["NYSE"]))
            .await
            .unwrap();

        let same_cik = company("3M Co", "66740", &["MMM2"], &["NYSE"]);
        assert!(matches!(
            storage.insert_company(&same_cik).await,
            Err(StorageError::ConstraintViolation { constraint, .. }) if constraint == "company_cik_key"
        ));

        let same_name = company("3M", "66741", &["MMM3"], &["NYSE"]);
        assert!(matches!(
            storage.insert_company(&same_name).await,
            Err(StorageError::ConstraintViolation { constraint, .. }) if constraint == "company_name_key"
        ));
    }

    #[tokio::test]
    async fn identical_headers_collide() {
        let mut storage = storage().await;
        let header = Header::new(["balance", "sheet"]);
        storage.insert_header(&header).await.unwrap();
        assert!(matches!(
            storage.insert_header(&header).await,
            Err(StorageError::ConstraintViolation { .. })
        ));

        // arrays compare in order, as in PostgreSQL
        storage
            .insert_header(&Header::new(["sheet", "balance"]))
            .await
            .unwrap();
        assert_eq!(storage.headers().len(), 2);
    }
}
