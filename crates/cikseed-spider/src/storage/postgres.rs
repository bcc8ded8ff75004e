use super::{sql, ticker_pairs, Header, Storage};
use crate::error::StorageError;
use crate::fetcher::Company;
use crate::http::PgClient;
use async_trait::async_trait;
use tokio_postgres::error::SqlState;
use tokio_postgres::{self as pg, NoTls};
use tracing::{debug, error, trace};

/// [`Storage`] over a single long-lived PostgreSQL connection.
///
/// Calls are awaited one after another, so the one connection is never shared between
/// concurrent callers.
pub struct PgStorage {
    client: PgClient,
}

impl PgStorage {
    /// Connect, and drive the connection on a background tokio task.
    pub async fn connect(config: &pg::Config) -> Result<Self, StorageError> {
        trace!("connecting to the database ...");
        let (client, conn) = config.connect(NoTls).await.map_err(|err| {
            error!("database connection error: {}", err);
            err
        })?;

        tokio::spawn(async move {
            if let Err(err) = conn.await {
                error!("database connection error: {}", err);
            }
        });
        debug!("database connection established");

        Ok(Self::from_client(client))
    }

    pub fn from_client(client: PgClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PgClient {
        &self.client
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn initialize_schema(&mut self) -> Result<(), StorageError> {
        let time = std::time::Instant::now();

        // DDL is transactional in PostgreSQL; an early return drops `transaction`, which
        // rolls back every table created so far
        let transaction = self
            .client
            .transaction()
            .await
            .map_err(|err| StorageError::Schema(format!("failed to open transaction: {err}")))?;

        for (table, stmt) in sql::SCHEMA {
            transaction.batch_execute(stmt).await.map_err(|err| {
                error!("failed to create table {table}, error({err})");
                StorageError::Schema(format!("failed to create table {table}: {err}"))
            })?;
            trace!("created table {table}");
        }

        transaction
            .commit()
            .await
            .map_err(|err| StorageError::Schema(format!("failed to commit schema: {err}")))?;

        debug!("schema created. {}", crate::time_elapsed(time));
        Ok(())
    }

    async fn insert_company(&mut self, company: &Company) -> Result<i32, StorageError> {
        let pairs = ticker_pairs(company)?;

        let transaction = self.client.transaction().await?;
        let id: i32 = transaction
            .query_one(sql::INSERT_COMPANY, &[&company.name, &company.cik.as_str()])
            .await
            .map_err(classify)?
            .get(0);

        let query = transaction.prepare(sql::INSERT_TICKER).await?;
        for (ticker, exchange) in pairs {
            transaction
                .execute(&query, &[&id, &ticker, &exchange])
                .await
                .map_err(classify)?;
        }

        transaction.commit().await.map_err(classify)?;
        trace!("inserted company {} [{}] as {id}", company.name, company.cik);

        Ok(id)
    }

    async fn insert_header(&mut self, header: &Header) -> Result<(), StorageError> {
        self.client
            .execute(sql::INSERT_HEADER, &[&header.keywords()])
            .await
            .map_err(classify)?;
        trace!("inserted header {:?}", header.keywords());
        Ok(())
    }
}

/// Surface unique violations as [`StorageError::ConstraintViolation`].
fn classify(err: pg::Error) -> StorageError {
    if let Some(db) = err.as_db_error() {
        if db.code() == &SqlState::UNIQUE_VIOLATION {
            return StorageError::ConstraintViolation {
                constraint: db.constraint().unwrap_or("unknown").to_string(),
                detail: db.detail().unwrap_or(db.message()).to_string(),
            };
        }
    }
    StorageError::Database(err)
}
