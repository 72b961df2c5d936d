// [libs/domain/models/src/job.rs]
/*!
 * APARATO: JOB DOMAIN MODEL (ESTRATO L2)
 * RESPONSABILIDAD: CICLO DE VIDA DE LA ORDEN DE CLASIFICACIÓN POR LOTES
 *
 * Invariant (spec §3): at most one Job with status = Running per input
 * source path — enforced by `leadscout-infra-store`'s unique index, not by
 * this type; this struct is the in-memory/serialized shape only.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled)
    }
}

/// A content fingerprint of the input source, used to detect whether the
/// file backing a resumed job has changed underneath it (spec §4.10,
/// `SourceChanged`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFingerprint {
    pub file_size_bytes: u64,
    pub modified_at_unix_seconds: i64,
}

impl SourceFingerprint {
    pub fn matches(&self, other: &SourceFingerprint) -> bool {
        self.file_size_bytes == other.file_size_bytes
            && self.modified_at_unix_seconds == other.modified_at_unix_seconds
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub input_source_path: String,
    pub source_fingerprint: SourceFingerprint,
    pub total_row_count: u64,
    pub batch_size: u32,
    /// Index of the last fully committed batch; -1 before any commit.
    pub last_committed_batch: i64,
    pub processed_row_count: u64,
    pub failed_row_count: u64,
    pub status: JobStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub accumulated_llm_cost: f64,
    pub accumulated_processing_seconds: f64,
    pub error_summary: Option<String>,
}

impl Job {
    pub fn new(input_source_path: String, source_fingerprint: SourceFingerprint, total_row_count: u64, batch_size: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            input_source_path,
            source_fingerprint,
            total_row_count,
            batch_size,
            last_committed_batch: -1,
            processed_row_count: 0,
            failed_row_count: 0,
            status: JobStatus::Running,
            started_at: Utc::now(),
            completed_at: None,
            accumulated_llm_cost: 0.0,
            accumulated_processing_seconds: 0.0,
            error_summary: None,
        }
    }

    /// First source-row index not yet known to be committed (spec §4.1/§4.10).
    pub fn resume_row_index(&self) -> u64 {
        ((self.last_committed_batch + 1) as i128 * self.batch_size as i128) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_job_resumes_from_zero() {
        let fp = SourceFingerprint { file_size_bytes: 10, modified_at_unix_seconds: 0 };
        let job = Job::new("leads.csv".into(), fp, 250, 100);
        assert_eq!(job.resume_row_index(), 0);
    }

    #[test]
    fn resume_row_tracks_committed_batches() {
        let fp = SourceFingerprint { file_size_bytes: 10, modified_at_unix_seconds: 0 };
        let mut job = Job::new("leads.csv".into(), fp, 250, 100);
        job.last_committed_batch = 0;
        assert_eq!(job.resume_row_index(), 100);
        job.last_committed_batch = 1;
        assert_eq!(job.resume_row_index(), 200);
    }
}
