// [apps/leadscout-cli/src/engine.rs]
/*!
 * =================================================================
 * APARATO: JOB ENGINE (V1.0)
 * CLASIFICACIÓN: APPLICATION LAYER (ORQUESTACIÓN DE LOTES)
 * RESPONSABILIDAD: ARRANQUE, REANUDACIÓN, BUCLE DE LOTES Y CIERRE DEL JOB
 *
 * Ties C1 (store), C6 (governor), C7 (cascade), C8 (learning), C9 (row
 * reader) and C11 (confirmation pipeline) into the three user-facing
 * operations: Run, Export, Ingest. The engine owns exactly one store
 * connection set per invocation; no component outside this file ever
 * opens a `StoreClient` directly.
 * =================================================================
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use leadscout_domain_cascade::CascadeExecutor;
use leadscout_domain_learning::LearningExtractor;
use leadscout_domain_models::{Confirmation, Job, JobStatus, LeadResult, ProviderId};
use leadscout_infra_governor::{config::ProviderGovernorConfig, RateGovernorImpl};
use leadscout_infra_llm::{LlmClassifierAdapter, LlmProviderClient, ProviderCredential};
use leadscout_infra_rowio::{fingerprint, ingest_confirmed_rows, write_category_legend, ExportRow, ExportWriter, SourceIndex, StreamingRowReader};
use leadscout_infra_store::{ExactCacheAdapter, LearnedPatternLookupAdapter, LearnedPatternRepository, LearningSinkAdapter, LlmCacheRepository, Store, StoreClient};

use crate::config::{ExportArgs, IngestArgs, RunArgs};
use crate::errors::EngineError;

/// Outcome of a `Run` invocation, carried back to `main` for logging; exit
/// code is derived from `EngineError` on the failure path, not from this.
pub struct RunOutcome {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub processed_row_count: u64,
    pub failed_row_count: u64,
}

#[instrument(skip(args, cancel_requested))]
pub async fn run(store_path: &str, holder_identifier: &str, args: RunArgs, cancel_requested: Arc<AtomicBool>) -> Result<RunOutcome, EngineError> {
    let client = StoreClient::connect(store_path).await?;
    let store = Store::open(&client)?;

    let source_path_string = args.source_path.to_string_lossy().to_string();
    let current_fingerprint = fingerprint(&args.source_path)?;
    let index = SourceIndex::build(&args.source_path)?;

    let job = resolve_job(&store, &source_path_string, current_fingerprint, index.total_row_count(), args.batch_size).await?;

    store.jobs.acquire_lock(&source_path_string, job.id, holder_identifier).await?;

    let outcome = execute_batches(&store, &client, &job, &args, &index, cancel_requested).await;

    if let Err(release_error) = store.jobs.release_lock(&source_path_string, job.id).await {
        warn!("failed to release job lock for '{}': {}", source_path_string, release_error);
    }

    outcome
}

/// Finds the job to continue (a still-`Running` job for this source) or
/// creates a fresh one. A prior job in a terminal state never blocks a new
/// run against the same source (spec §3: the uniqueness invariant is scoped
/// to `Running` jobs only).
async fn resolve_job(store: &Store, source_path: &str, current_fingerprint: leadscout_domain_models::SourceFingerprint, total_row_count: u64, batch_size: u32) -> Result<Job, EngineError> {
    if let Some(existing) = store.jobs.most_recent_job_for_source(source_path).await? {
        if existing.status == JobStatus::Running {
            store.jobs.ensure_fingerprint_unchanged(&existing, current_fingerprint)?;
            info!("resuming job {} from batch {}", existing.id, existing.last_committed_batch + 1);
            return Ok(existing);
        }
    }

    let job = store.jobs.create_job(source_path, current_fingerprint, total_row_count, batch_size).await?;
    info!("created job {} for '{}'", job.id, source_path);
    Ok(job)
}

/// Wires the cascade and runs the batch loop to completion, cancellation,
/// or job-level failure. Cancellation is only observed between batches: a
/// batch already in flight always runs to a full commit, never a partial
/// one (spec §5: "drains the current batch to a clean state... before
/// exit").
async fn execute_batches(store: &Store, client: &StoreClient, job: &Job, args: &RunArgs, index: &SourceIndex, cancel_requested: Arc<AtomicBool>) -> Result<RunOutcome, EngineError> {
    let executor = build_cascade_executor(client, args)?;

    let mut reader = StreamingRowReader::open(&args.source_path, index, job.batch_size, job.resume_row_index())?;

    let mut last_committed_batch = job.last_committed_batch;
    let mut session_cost_so_far = job.accumulated_llm_cost;
    let mut job_was_cancelled = false;

    loop {
        if cancel_requested.load(Ordering::SeqCst) {
            info!("cancellation observed between batches, stopping after last commit");
            job_was_cancelled = true;
            break;
        }

        let Some(batch) = reader.next_batch()? else { break };
        let batch_index = last_committed_batch + 1;
        let batch_started = Instant::now();

        let cancel_flag = Arc::clone(&cancel_requested);
        let results: Vec<LeadResult> = stream::iter(batch.rows.into_iter())
            .map(|row| {
                let executor = &executor;
                let cancel_flag = Arc::clone(&cancel_flag);
                let job_id = job.id;
                async move { classify_row(executor, job_id, row, session_cost_so_far, &*cancel_flag).await }
            })
            .buffer_unordered(args.max_concurrent.max(1))
            .collect()
            .await;

        let mut results = results;
        results.sort_by_key(|result| result.source_row_index);

        let batch_llm_cost: f64 = results.iter().map(|result| result.llm_cost).sum();
        let batch_processing_seconds = batch_started.elapsed().as_secs_f64();

        store.jobs.record_batch(job.id, batch_index, last_committed_batch, &results, batch_llm_cost, batch_processing_seconds).await?;

        last_committed_batch = batch_index;
        session_cost_so_far += batch_llm_cost;
    }

    if job_was_cancelled {
        store.jobs.mark_cancelled(job.id).await?;
    } else {
        let validation = store.jobs.validate_job(job.id).await?;
        if validation.matches() {
            store.jobs.mark_completed(job.id).await?;
        } else {
            let summary = format!(
                "result count mismatch: expected {} rows, found {}",
                validation.expected_row_count, validation.actual_result_count
            );
            store.jobs.mark_failed(job.id, &summary).await?;
            return Err(EngineError::ValidationFailed(summary));
        }
    }

    let completed_job = store.jobs.get_job(job.id).await?;
    Ok(RunOutcome {
        job_id: completed_job.id,
        status: completed_job.status,
        processed_row_count: completed_job.processed_row_count,
        failed_row_count: completed_job.failed_row_count,
    })
}

async fn classify_row(executor: &CascadeExecutor, job_id: Uuid, row: leadscout_infra_rowio::ParsedLeadRow, session_cost_so_far: f64, cancel_flag: &AtomicBool) -> LeadResult {
    if let Some(validation_error) = row.validation_error {
        let mut result = LeadResult::unclassified(job_id, row.source_row_index, row.fields);
        result.error_kind = Some("lead-validation".to_string());
        result.error_message = Some(validation_error);
        return result;
    }

    let cancelled = || cancel_flag.load(Ordering::SeqCst);
    let outcome = executor.classify(&row.fields.director_name, &cancelled, session_cost_so_far).await;

    LeadResult {
        job_id,
        source_row_index: row.source_row_index,
        source_fields: row.fields,
        category: outcome.category,
        confidence: outcome.confidence,
        method: outcome.method,
        processing_time_ms: outcome.processing_time_ms,
        provider: outcome.provider,
        llm_cost: outcome.llm_cost,
        retry_count: 0,
        error_kind: outcome.error_kind,
        error_message: outcome.error_message,
        created_at: chrono::Utc::now(),
    }
}

fn build_cascade_executor(client: &StoreClient, args: &RunArgs) -> Result<CascadeExecutor, EngineError> {
    let exact_cache = ExactCacheAdapter::new(LlmCacheRepository::new(client.connection()?));
    let learned_patterns = LearnedPatternLookupAdapter::new(LearnedPatternRepository::new(client.connection()?));
    let learning_sink = LearningSinkAdapter::new(LlmCacheRepository::new(client.connection()?), LearnedPatternRepository::new(client.connection()?));
    let learning_handoff = LearningExtractor::new(Arc::new(learning_sink));

    let mut credentials = HashMap::new();
    if let Some(api_key) = args.provider_a_api_key.clone() {
        if let Some(base_url) = args.provider_a_base_url.clone() {
            credentials.insert(ProviderId::ProviderA, ProviderCredential { base_url, api_key, price_per_1k_tokens: args.provider_a_price_per_1k_tokens });
        }
    }
    if let Some(api_key) = args.provider_b_api_key.clone() {
        if let Some(base_url) = args.provider_b_base_url.clone() {
            credentials.insert(ProviderId::ProviderB, ProviderCredential { base_url, api_key, price_per_1k_tokens: args.provider_b_price_per_1k_tokens });
        }
    }
    if credentials.is_empty() {
        warn!("no provider credentials supplied; L4 is disabled for this run (cascade still operates on L0-L3)");
    }

    let llm_client = LlmProviderClient::new(credentials, Duration::from_secs(args.per_request_timeout_seconds));
    let llm_classifier = LlmClassifierAdapter::new(llm_client);

    let governor_config = ProviderGovernorConfig {
        requests_per_minute: args.provider_a_rpm,
        initial_backoff: Duration::from_secs(args.initial_backoff_seconds),
        max_backoff: Duration::from_secs(args.max_backoff_seconds),
        backoff_multiplier: args.backoff_multiplier,
        ..ProviderGovernorConfig::default()
    };
    let mut governor_configs = HashMap::new();
    governor_configs.insert(ProviderId::ProviderA, governor_config);
    governor_configs.insert(
        ProviderId::ProviderB,
        ProviderGovernorConfig { requests_per_minute: args.provider_b_rpm, ..governor_config },
    );
    let governor = RateGovernorImpl::new(governor_configs);

    Ok(CascadeExecutor::new(
        Arc::new(exact_cache),
        Arc::new(learned_patterns),
        Arc::new(llm_classifier),
        Arc::new(governor),
        Arc::new(learning_handoff),
        args.max_llm_cost_per_session,
        args.phonetic_similarity_threshold,
        args.learned_pattern_min_confidence,
    ))
}

/// Exports every committed `LeadResult` of a completed job to an enriched
/// CSV, zipping each result back against its original source row by
/// `source_row_index`, and registers a placeholder `Confirmation` per row
/// so a later `Ingest` can locate it (spec §4.11).
#[instrument(skip(args))]
pub async fn export_job(store_path: &str, args: ExportArgs) -> Result<u64, EngineError> {
    let client = StoreClient::connect(store_path).await?;
    let store = Store::open(&client)?;

    const EXPORT_SCAN_BATCH_SIZE: u32 = 500;

    let source_fingerprint = fingerprint(&args.source_path)?;
    let index = SourceIndex::build(&args.source_path)?;
    let mut reader = StreamingRowReader::open(&args.source_path, &index, EXPORT_SCAN_BATCH_SIZE, 0)?;

    let results = store.jobs.list_results(args.job_id).await?;
    let mut results_by_row: HashMap<u64, LeadResult> = results.into_iter().map(|result| (result.source_row_index, result)).collect();

    let mut writer = ExportWriter::create(&args.output_path, index.headers())?;
    let mut exported_count = 0u64;

    while let Some(batch) = reader.next_batch()? {
        for row in batch.rows {
            let Some(result) = results_by_row.remove(&row.source_row_index) else {
                warn!("no committed result for source row {}, skipping export", row.source_row_index);
                continue;
            };

            writer.write_row(ExportRow { original: &row.original, result: &result })?;

            let confirmation = Confirmation {
                source_fingerprint,
                source_row_index: result.source_row_index,
                entity_name: result.source_fields.entity_name.clone(),
                director_name: result.source_fields.director_name.clone(),
                canonical_city: result.source_fields.registered_city.clone(),
                canonical_province: result.source_fields.registered_province.clone(),
                spatial_context_hash: leadscout_domain_models::spatial_context_hash(result.source_fields.registered_city.as_deref(), result.source_fields.registered_province.as_deref()),
                predicted_category: result.category,
                predicted_confidence: result.confidence,
                predicted_method: result.method,
                confirmed_category: None,
                confirmer_identity: None,
                confirmed_at: None,
                notes: None,
            };
            store.confirmations.record_export(&confirmation).await?;
            exported_count += 1;
        }
    }

    writer.flush()?;
    if let Some(legend_path) = args.legend_path.as_deref() {
        write_category_legend(legend_path)?;
    }

    info!("exported {} rows for job {}", exported_count, args.job_id);
    Ok(exported_count)
}

/// Applies every filled-in `confirmed_ethnicity` value from a completed
/// export round-trip. Rows left blank by the reviewer never reach this
/// function (`ingest_confirmed_rows` already filters them), so the
/// round-trip invariant holds by construction: no confirmations filled in
/// means no `Confirmation` rows are created or modified.
#[instrument(skip(args))]
pub async fn ingest_confirmations(store_path: &str, args: IngestArgs) -> Result<u64, EngineError> {
    let client = StoreClient::connect(store_path).await?;
    let store = Store::open(&client)?;

    let source_fingerprint = fingerprint(&args.source_path)?;
    let ingested = ingest_confirmed_rows(&args.export_path, source_fingerprint)?;

    let mut applied_count = 0u64;
    for entry in ingested {
        let Some((confirmation_id, _existing)) = store.confirmations.find_by_fingerprint_and_row(source_fingerprint, entry.confirmation.source_row_index).await? else {
            warn!("no exported confirmation row found for source row {}, skipping", entry.confirmation.source_row_index);
            continue;
        };

        let Some(confirmed_category) = entry.confirmation.confirmed_category else { continue };
        store
            .confirmations
            .apply_confirmation(confirmation_id, confirmed_category, &args.confirmer_identity, entry.confirmation.notes.as_deref())
            .await?;
        applied_count += 1;
    }

    info!("applied {} confirmations", applied_count);
    Ok(applied_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should create");
        write!(file, "{}", contents).expect("fixture should write");
        file
    }

    #[tokio::test]
    async fn empty_source_completes_immediately_with_zero_rows() {
        let source = write_fixture("entity_name,director_name,registered_address,registered_city,registered_province\n");
        let store_file = tempfile::NamedTempFile::new().expect("store file should create");
        let store_path = store_file.path().to_string_lossy().to_string();

        let args = RunArgs {
            source_path: source.path().to_path_buf(),
            batch_size: 100,
            max_concurrent: 4,
            max_llm_cost_per_session: 10.0,
            provider_a_rpm: 30,
            provider_b_rpm: 30,
            initial_backoff_seconds: 1,
            max_backoff_seconds: 10,
            backoff_multiplier: 2.0,
            per_request_timeout_seconds: 5,
            phonetic_similarity_threshold: 0.85,
            learned_pattern_min_confidence: 0.6,
            provider_a_api_key: None,
            provider_a_base_url: None,
            provider_a_price_per_1k_tokens: 0.002,
            provider_b_api_key: None,
            provider_b_base_url: None,
            provider_b_price_per_1k_tokens: 0.0025,
        };

        let outcome = run(&store_path, "test-holder", args, Arc::new(AtomicBool::new(false))).await.expect("run should complete");
        assert_eq!(outcome.processed_row_count, 0);
        assert_eq!(outcome.status, JobStatus::Completed);
    }

    #[tokio::test]
    async fn rule_dictionary_name_is_classified_at_zero_cost() {
        let source = write_fixture(
            "entity_name,director_name,registered_address,registered_city,registered_province\n\
             Acme,Thabo Mthembu,,,\n",
        );
        let store_file = tempfile::NamedTempFile::new().expect("store file should create");
        let store_path = store_file.path().to_string_lossy().to_string();

        let args = RunArgs {
            source_path: source.path().to_path_buf(),
            batch_size: 100,
            max_concurrent: 4,
            max_llm_cost_per_session: 10.0,
            provider_a_rpm: 30,
            provider_b_rpm: 30,
            initial_backoff_seconds: 1,
            max_backoff_seconds: 10,
            backoff_multiplier: 2.0,
            per_request_timeout_seconds: 5,
            phonetic_similarity_threshold: 0.85,
            learned_pattern_min_confidence: 0.6,
            provider_a_api_key: None,
            provider_a_base_url: None,
            provider_a_price_per_1k_tokens: 0.002,
            provider_b_api_key: None,
            provider_b_base_url: None,
            provider_b_price_per_1k_tokens: 0.0025,
        };

        let outcome = run(&store_path, "test-holder", args, Arc::new(AtomicBool::new(false))).await.expect("run should complete");
        assert_eq!(outcome.processed_row_count, 1);
        assert_eq!(outcome.failed_row_count, 0);
    }
}
