// [libs/infra/store/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PERSISTENT STORE FACADE (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PUNTO ÚNICO DE ENTRADA AL SUSTRATO EMBEBIDO
 *
 * Wires the embedded libSQL connection to every repository (C1) and exposes
 * the concrete adapters the cascade (C7) and the learning extractor (C8)
 * program against through traits, so `apps/leadscout-cli` never touches
 * libsql directly.
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod repositories;
pub mod schema;

pub use client::StoreClient;
pub use errors::StoreError;

pub use repositories::confirmation::ConfirmationRepository;
pub use repositories::job::{JobRepository, ResultCountValidation};
pub use repositories::learned_pattern::{LearnedPatternLookupAdapter, LearnedPatternRepository, LearningSinkAdapter};
pub use repositories::llm_cache::{ExactCacheAdapter, LlmCacheRepository};

/// Everything a job run needs out of the persistent store, opened against
/// one embedded connection. `apps/leadscout-cli`'s engine owns one of these
/// per job; repositories are cheap views over the same underlying
/// connection, not separate pools.
pub struct Store {
    pub jobs: JobRepository,
    pub llm_cache: LlmCacheRepository,
    pub learned_patterns: LearnedPatternRepository,
    pub confirmations: ConfirmationRepository,
}

impl Store {
    pub fn open(client: &StoreClient) -> Result<Self, StoreError> {
        Ok(Self {
            jobs: JobRepository::new(client.connection()?),
            llm_cache: LlmCacheRepository::new(client.connection()?),
            learned_patterns: LearnedPatternRepository::new(client.connection()?),
            confirmations: ConfirmationRepository::new(client.connection()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadscout_domain_models::SourceFingerprint;

    async fn open_test_store() -> (StoreClient, Store) {
        let client = StoreClient::connect(":memory:").await.expect("in-memory store should open");
        let store = Store::open(&client).expect("repositories should wire up");
        (client, store)
    }

    #[tokio::test]
    async fn duplicate_running_job_for_same_source_is_rejected() {
        let (_client, store) = open_test_store().await;
        let fingerprint = SourceFingerprint { file_size_bytes: 128, modified_at_unix_seconds: 1_700_000_000 };

        store.jobs.create_job("leads.csv", fingerprint, 100, 25).await.expect("first job should create");
        let second = store.jobs.create_job("leads.csv", fingerprint, 100, 25).await;

        assert!(matches!(second, Err(StoreError::DuplicateRunningJob)));
    }

    #[tokio::test]
    async fn stale_watermark_commit_is_rejected() {
        let (_client, store) = open_test_store().await;
        let fingerprint = SourceFingerprint { file_size_bytes: 128, modified_at_unix_seconds: 1_700_000_000 };
        let job = store.jobs.create_job("leads.csv", fingerprint, 100, 25).await.expect("job should create");

        store.jobs.record_batch(job.id, 0, -1, &[], 0.0, 0.0).await.expect("first commit should apply against the fresh watermark");

        let retry = store.jobs.record_batch(job.id, 0, -1, &[], 0.0, 0.0).await;
        assert!(matches!(retry, Err(StoreError::StaleWatermark { .. })));
    }
}
