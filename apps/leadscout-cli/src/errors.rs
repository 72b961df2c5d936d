// [apps/leadscout-cli/src/errors.rs]
/*!
 * APARATO: JOB ENGINE ERROR CATALOG
 * RESPONSABILIDAD: FALLOS DE ARRANQUE Y EJECUCIÓN MAPEADOS A CÓDIGOS DE SALIDA
 *
 * Exit codes (spec §6): 0 completed, 1 failed validation, 2 lock contention,
 * 3 source changed. `DuplicateRunningJob` is grouped with lock contention --
 * both witness the same invariant ("at most one Running job per source"),
 * just caught at a different layer (the jobs table vs. the job_locks table).
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("source validation failed: {0}")]
    ValidationFailed(String),

    #[error("another job already holds this source: {0}")]
    LockContention(String),

    #[error("source file changed since the job started: {0}")]
    SourceChanged(String),

    #[error(transparent)]
    Store(#[from] leadscout_infra_store::StoreError),

    #[error(transparent)]
    RowIo(#[from] leadscout_infra_rowio::RowIoError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::ValidationFailed(_) => 1,
            EngineError::LockContention(_) => 2,
            EngineError::SourceChanged(_) => 3,
            EngineError::Store(leadscout_infra_store::StoreError::DuplicateRunningJob) => 2,
            EngineError::Store(leadscout_infra_store::StoreError::LockHeldByOther(_)) => 2,
            EngineError::Store(leadscout_infra_store::StoreError::SourceChanged(_)) => 3,
            EngineError::Store(_) | EngineError::RowIo(_) | EngineError::Io(_) => 1,
        }
    }
}
