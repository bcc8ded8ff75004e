use thiserror::Error;

/// Failures while producing the list of candidate CIKs.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("failed to fetch {url}, error({source})")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse the document at {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("couldn't find any tables on the source page {url}")]
    NoTableFound { url: String },
}

/// Failures while fetching one company's submissions metadata.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch submissions for CIK {cik}, error({source})")]
    Transport {
        cik: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode submissions for CIK {cik}: {reason}")]
    Decode { cik: String, reason: String },
}

/// Failures raised by a [`Storage`](crate::storage::Storage) implementation.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Schema creation failed, or the schema is missing; fatal for the process.
    #[error("schema error: {0}")]
    Schema(String),

    /// The record breaks an invariant before it ever reaches the database.
    #[error("corrupted data: {0}")]
    CorruptData(String),

    #[error("unique constraint \"{constraint}\" violated: {detail}")]
    ConstraintViolation { constraint: String, detail: String },

    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),
}

/// Fatal failures of an ingestion run.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("bootstrapping failed")]
    Bootstrap(#[source] StorageError),

    #[error("resolving CIKs failed")]
    Resolve(#[from] ResolveError),
}
