// [libs/infra/store/src/errors.rs]
/*!
 * APARATO: STORE ERROR CATALOG
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DE PERSISTENCIA
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection failed: {0}")]
    ConnectionError(String),

    #[error("sql execution failed: {0}")]
    QueryError(#[from] libsql::Error),

    #[error("row mapping failed: {0}")]
    MappingError(String),

    #[error("transaction could not be committed: {0}")]
    TransactionError(String),

    #[error("a job is already running against this source path")]
    DuplicateRunningJob,

    #[error("job {0} not found")]
    JobNotFound(uuid::Uuid),

    #[error("lock for '{0}' is held by a different job")]
    LockHeldByOther(String),

    #[error("no lock held for '{0}'")]
    LockNotHeld(String),

    #[error("source file at '{0}' changed since the job started (size/mtime fingerprint mismatch)")]
    SourceChanged(String),

    #[error("batch {attempted} could not be committed: watermark has moved past {expected}")]
    StaleWatermark { expected: i64, attempted: i64 },

    #[error("schema application failed: {0}")]
    SchemaError(String),
}

impl From<anyhow::Error> for StoreError {
    fn from(error: anyhow::Error) -> Self {
        StoreError::SchemaError(error.to_string())
    }
}
