// [libs/infra/store/src/repositories/job/mod.rs]
/*!
 * =================================================================
 * APARATO: JOB REPOSITORY (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CICLO DE VIDA DEL JOB, CANDADO EXCLUSIVO Y COMMITS POR LOTE
 *
 * Enforces the "at most one Running job per input source path" invariant
 * (spec §3) and the conservative-resume contract (spec §4.1/§4.10):
 * watermark advances are guarded by an optimistic check against the
 * previous `last_committed_batch`, so a racing second writer for the same
 * job can never skip or double-apply a batch.
 * =================================================================
 */

pub mod queries;

use chrono::Utc;
use libsql::{params, Connection};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use leadscout_domain_models::{CanonicalCategory, ClassificationMethod, Job, JobLock, JobStatus, LeadResult, LeadSourceFields, ProviderId, SourceFingerprint};
use std::str::FromStr;

use crate::errors::StoreError;
use self::queries as sql;

pub struct JobRepository {
    connection: Connection,
}

/// Outcome of the completion-time row-count recompute (spec §4.1/§8).
#[derive(Debug, Clone, Copy)]
pub struct ResultCountValidation {
    pub expected_row_count: u64,
    pub actual_result_count: u64,
}

impl ResultCountValidation {
    pub fn matches(&self) -> bool {
        self.expected_row_count == self.actual_result_count
    }
}

impl JobRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    #[instrument(skip(self))]
    pub async fn create_job(&self, input_source_path: &str, fingerprint: SourceFingerprint, total_row_count: u64, batch_size: u32) -> Result<Job, StoreError> {
        let mut existing = self.connection.query(sql::FIND_RUNNING_BY_SOURCE, params![input_source_path]).await?;
        if existing.next().await?.is_some() {
            return Err(StoreError::DuplicateRunningJob);
        }

        let job = Job::new(input_source_path.to_string(), fingerprint, total_row_count, batch_size);
        self.connection
            .execute(
                sql::INSERT_JOB,
                params![
                    job.id.to_string(),
                    job.input_source_path.clone(),
                    fingerprint.file_size_bytes as i64,
                    fingerprint.modified_at_unix_seconds,
                    job.total_row_count as i64,
                    job.batch_size as i64,
                    job.started_at.to_rfc3339(),
                ],
            )
            .await?;

        info!("job {} created for '{}'", job.id, input_source_path);
        Ok(job)
    }

    pub async fn get_job(&self, job_id: Uuid) -> Result<Job, StoreError> {
        let mut rows = self.connection.query(sql::GET_JOB_BY_ID, params![job_id.to_string()]).await?;
        let row = rows.next().await?.ok_or(StoreError::JobNotFound(job_id))?;
        map_row_to_job(&row)
    }

    /// Finds the most recent job against `input_source_path`, for resume
    /// decisions at job startup (spec §4.10).
    pub async fn most_recent_job_for_source(&self, input_source_path: &str) -> Result<Option<Job>, StoreError> {
        let mut rows = self.connection.query(sql::GET_MOST_RECENT_BY_SOURCE, params![input_source_path]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(map_row_to_job(&row)?)),
            None => Ok(None),
        }
    }

    /// Confirms the source file hasn't drifted under a resumed job.
    pub fn ensure_fingerprint_unchanged(&self, job: &Job, current_fingerprint: SourceFingerprint) -> Result<(), StoreError> {
        if !job.source_fingerprint.matches(&current_fingerprint) {
            return Err(StoreError::SourceChanged(job.input_source_path.clone()));
        }
        Ok(())
    }

    /// Recomputes `count(LeadResult where job = job_id)` against
    /// `Job.total_row_count` (spec §4.1/§8 invariant: the two must be
    /// equal). Called once at completion, after the last batch commits and
    /// before the job is marked completed.
    pub async fn validate_job(&self, job_id: Uuid) -> Result<ResultCountValidation, StoreError> {
        let job = self.get_job(job_id).await?;
        let mut rows = self.connection.query(sql::COUNT_RESULTS_FOR_JOB, params![job_id.to_string()]).await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::MappingError("COUNT(*) returned no row".to_string()))?;
        let actual_result_count: i64 = row.get(0)?;

        Ok(ResultCountValidation { expected_row_count: job.total_row_count, actual_result_count: actual_result_count as u64 })
    }

    #[instrument(skip(self, holder_identifier))]
    pub async fn acquire_lock(&self, input_source_path: &str, job_id: Uuid, holder_identifier: &str) -> Result<JobLock, StoreError> {
        let mut existing = self.connection.query(sql::GET_LOCK, params![input_source_path]).await?;
        if let Some(row) = existing.next().await? {
            let held_by_job: String = row.get(0)?;
            if held_by_job != job_id.to_string() {
                return Err(StoreError::LockHeldByOther(input_source_path.to_string()));
            }
        }

        let acquired_at = Utc::now();
        self.connection
            .execute(sql::ACQUIRE_LOCK, params![input_source_path, job_id.to_string(), holder_identifier, acquired_at.to_rfc3339()])
            .await?;

        Ok(JobLock { input_source_path: input_source_path.to_string(), job_id, holder_identifier: holder_identifier.to_string(), acquired_at })
    }

    pub async fn release_lock(&self, input_source_path: &str, job_id: Uuid) -> Result<(), StoreError> {
        let affected = self.connection.execute(sql::RELEASE_LOCK, params![input_source_path, job_id.to_string()]).await?;
        if affected == 0 {
            warn!("release_lock: no lock held for '{}' by job {}", input_source_path, job_id);
            return Err(StoreError::LockNotHeld(input_source_path.to_string()));
        }
        Ok(())
    }

    /// Commits one batch transactionally: every `LeadResult` row plus the
    /// watermark advance, or neither. `expected_previous_batch` is the
    /// optimistic-concurrency guard: the update only applies if the
    /// watermark is still where the caller last observed it.
    #[instrument(skip(self, lead_results))]
    pub async fn record_batch(
        &self,
        job_id: Uuid,
        batch_index: i64,
        expected_previous_batch: i64,
        lead_results: &[LeadResult],
        batch_llm_cost: f64,
        batch_processing_seconds: f64,
    ) -> Result<(), StoreError> {
        let transaction = self.connection.transaction().await.map_err(|error| StoreError::TransactionError(error.to_string()))?;

        for result in lead_results {
            transaction
                .execute(
                    sql::INSERT_LEAD_RESULT,
                    params![
                        job_id.to_string(),
                        result.source_row_index as i64,
                        result.source_fields.entity_name.clone(),
                        result.source_fields.director_name.clone(),
                        result.source_fields.registered_address.clone(),
                        result.source_fields.registered_city.clone(),
                        result.source_fields.registered_province.clone(),
                        result.category.map(|c| c.code().to_string()),
                        result.confidence,
                        result.method.code(),
                        result.processing_time_ms as i64,
                        result.provider.map(|p| p.label().to_string()),
                        result.llm_cost,
                        result.retry_count as i64,
                        result.error_kind.clone(),
                        result.error_message.clone(),
                        result.created_at.to_rfc3339(),
                    ],
                )
                .await?;
        }

        let failed_in_batch = lead_results.iter().filter(|r| r.is_failure()).count() as i64;
        let affected = transaction
            .execute(
                sql::ADVANCE_WATERMARK,
                params![
                    job_id.to_string(),
                    batch_index,
                    lead_results.len() as i64,
                    failed_in_batch,
                    batch_llm_cost,
                    batch_processing_seconds,
                    expected_previous_batch,
                ],
            )
            .await?;

        if affected == 0 {
            transaction.rollback().await.map_err(|error| StoreError::TransactionError(error.to_string()))?;
            return Err(StoreError::StaleWatermark { expected: expected_previous_batch, attempted: batch_index });
        }

        transaction.commit().await.map_err(|error| StoreError::TransactionError(error.to_string()))?;
        info!("job {} committed batch {} ({} rows)", job_id, batch_index, lead_results.len());
        Ok(())
    }

    /// Fetches every committed `LeadResult` for a job in source-row order, for
    /// the Confirmation Pipeline's export pass (spec §4.11).
    pub async fn list_results(&self, job_id: Uuid) -> Result<Vec<LeadResult>, StoreError> {
        let mut rows = self.connection.query(sql::FETCH_RESULTS_FOR_JOB, params![job_id.to_string()]).await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(map_row_to_lead_result(&row)?);
        }
        Ok(results)
    }

    pub async fn mark_completed(&self, job_id: Uuid) -> Result<(), StoreError> {
        self.connection.execute(sql::MARK_COMPLETED, params![job_id.to_string(), Utc::now().to_rfc3339()]).await?;
        Ok(())
    }

    pub async fn mark_failed(&self, job_id: Uuid, error_summary: &str) -> Result<(), StoreError> {
        self.connection.execute(sql::MARK_FAILED, params![job_id.to_string(), Utc::now().to_rfc3339(), error_summary]).await?;
        Ok(())
    }

    pub async fn mark_cancelled(&self, job_id: Uuid) -> Result<(), StoreError> {
        self.connection.execute(sql::MARK_CANCELLED, params![job_id.to_string(), Utc::now().to_rfc3339()]).await?;
        Ok(())
    }
}

fn map_row_to_job(row: &libsql::Row) -> Result<Job, StoreError> {
    let id: String = row.get(0)?;
    let input_source_path: String = row.get(1)?;
    let file_size_bytes: i64 = row.get(2)?;
    let modified_at_unix_seconds: i64 = row.get(3)?;
    let total_row_count: i64 = row.get(4)?;
    let batch_size: i64 = row.get(5)?;
    let last_committed_batch: i64 = row.get(6)?;
    let processed_row_count: i64 = row.get(7)?;
    let failed_row_count: i64 = row.get(8)?;
    let status: String = row.get(9)?;
    let started_at: String = row.get(10)?;
    let completed_at: Option<String> = row.get(11)?;
    let accumulated_llm_cost: f64 = row.get(12)?;
    let accumulated_processing_seconds: f64 = row.get(13)?;
    let error_summary: Option<String> = row.get(14)?;

    Ok(Job {
        id: Uuid::parse_str(&id).map_err(|error| StoreError::MappingError(error.to_string()))?,
        input_source_path,
        source_fingerprint: SourceFingerprint { file_size_bytes: file_size_bytes as u64, modified_at_unix_seconds },
        total_row_count: total_row_count as u64,
        batch_size: batch_size as u32,
        last_committed_batch,
        processed_row_count: processed_row_count as u64,
        failed_row_count: failed_row_count as u64,
        status: parse_status(&status)?,
        started_at: parse_timestamp(&started_at)?,
        completed_at: completed_at.map(|value| parse_timestamp(&value)).transpose()?,
        accumulated_llm_cost,
        accumulated_processing_seconds,
        error_summary,
    })
}

fn map_row_to_lead_result(row: &libsql::Row) -> Result<LeadResult, StoreError> {
    let job_id: String = row.get(0)?;
    let source_row_index: i64 = row.get(1)?;
    let entity_name: String = row.get(2)?;
    let director_name: String = row.get(3)?;
    let registered_address: Option<String> = row.get(4)?;
    let registered_city: Option<String> = row.get(5)?;
    let registered_province: Option<String> = row.get(6)?;
    let category: Option<String> = row.get(7)?;
    let confidence: f64 = row.get(8)?;
    let method: String = row.get(9)?;
    let processing_time_ms: i64 = row.get(10)?;
    let provider: Option<String> = row.get(11)?;
    let llm_cost: f64 = row.get(12)?;
    let retry_count: i64 = row.get(13)?;
    let error_kind: Option<String> = row.get(14)?;
    let error_message: Option<String> = row.get(15)?;
    let created_at: String = row.get(16)?;

    Ok(LeadResult {
        job_id: Uuid::parse_str(&job_id).map_err(|error| StoreError::MappingError(error.to_string()))?,
        source_row_index: source_row_index as u64,
        source_fields: LeadSourceFields { entity_name, director_name, registered_address, registered_city, registered_province },
        category: category.map(|value| CanonicalCategory::from_str(&value)).transpose().map_err(|error| StoreError::MappingError(error.to_string()))?,
        confidence,
        method: parse_method(&method)?,
        processing_time_ms: processing_time_ms as u64,
        provider: provider.map(|value| parse_provider(&value)).transpose()?,
        llm_cost,
        retry_count: retry_count as u32,
        error_kind,
        error_message,
        created_at: parse_timestamp(&created_at)?,
    })
}

fn parse_method(value: &str) -> Result<ClassificationMethod, StoreError> {
    match value {
        "exact-cache" => Ok(ClassificationMethod::ExactCache),
        "rule" => Ok(ClassificationMethod::Rule),
        "phonetic" => Ok(ClassificationMethod::Phonetic),
        "learned" => Ok(ClassificationMethod::Learned),
        "llm" => Ok(ClassificationMethod::Llm),
        "none" => Ok(ClassificationMethod::None),
        other => Err(StoreError::MappingError(format!("unknown classification method '{other}'"))),
    }
}

fn parse_provider(value: &str) -> Result<ProviderId, StoreError> {
    ProviderId::all().iter().copied().find(|provider| provider.label() == value).ok_or_else(|| StoreError::MappingError(format!("unknown provider '{value}'")))
}

fn parse_status(value: &str) -> Result<JobStatus, StoreError> {
    match value {
        "running" => Ok(JobStatus::Running),
        "completed" => Ok(JobStatus::Completed),
        "failed" => Ok(JobStatus::Failed),
        "cancelled" => Ok(JobStatus::Cancelled),
        other => Err(StoreError::MappingError(format!("unknown job status '{other}'"))),
    }
}

fn parse_timestamp(value: &str) -> Result<chrono::DateTime<Utc>, StoreError> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|error| StoreError::MappingError(error.to_string()))
}
