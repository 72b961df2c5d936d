// [libs/infra/store/src/repositories/job/queries.rs]
/*!
 * APARATO: JOB REPOSITORY SQL REGISTRY
 * RESPONSABILIDAD: SENTENCIAS ATÓMICAS PARA EL CICLO DE VIDA DEL JOB
 */

pub const FIND_RUNNING_BY_SOURCE: &str = r#"
    SELECT id FROM jobs WHERE input_source_path = ?1 AND status = 'running' LIMIT 1
"#;

pub const INSERT_JOB: &str = r#"
    INSERT INTO jobs (
        id, input_source_path, source_file_size_bytes, source_modified_at_unix_seconds,
        total_row_count, batch_size, last_committed_batch, processed_row_count,
        failed_row_count, status, started_at, completed_at,
        accumulated_llm_cost, accumulated_processing_seconds, error_summary
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, -1, 0, 0, 'running', ?7, NULL, 0.0, 0.0, NULL)
"#;

pub const GET_JOB_BY_ID: &str = r#"
    SELECT id, input_source_path, source_file_size_bytes, source_modified_at_unix_seconds,
           total_row_count, batch_size, last_committed_batch, processed_row_count,
           failed_row_count, status, started_at, completed_at,
           accumulated_llm_cost, accumulated_processing_seconds, error_summary
    FROM jobs WHERE id = ?1
"#;

pub const GET_MOST_RECENT_BY_SOURCE: &str = r#"
    SELECT id, input_source_path, source_file_size_bytes, source_modified_at_unix_seconds,
           total_row_count, batch_size, last_committed_batch, processed_row_count,
           failed_row_count, status, started_at, completed_at,
           accumulated_llm_cost, accumulated_processing_seconds, error_summary
    FROM jobs WHERE input_source_path = ?1 ORDER BY started_at DESC LIMIT 1
"#;

pub const ADVANCE_WATERMARK: &str = r#"
    UPDATE jobs
    SET last_committed_batch = ?2,
        processed_row_count = processed_row_count + ?3,
        failed_row_count = failed_row_count + ?4,
        accumulated_llm_cost = accumulated_llm_cost + ?5,
        accumulated_processing_seconds = accumulated_processing_seconds + ?6
    WHERE id = ?1 AND last_committed_batch = ?7
"#;

pub const MARK_COMPLETED: &str = r#"
    UPDATE jobs SET status = 'completed', completed_at = ?2 WHERE id = ?1
"#;

pub const MARK_FAILED: &str = r#"
    UPDATE jobs SET status = 'failed', completed_at = ?2, error_summary = ?3 WHERE id = ?1
"#;

pub const MARK_CANCELLED: &str = r#"
    UPDATE jobs SET status = 'cancelled', completed_at = ?2 WHERE id = ?1
"#;

pub const ACQUIRE_LOCK: &str = r#"
    INSERT INTO job_locks (input_source_path, job_id, holder_identifier, acquired_at)
    VALUES (?1, ?2, ?3, ?4)
"#;

pub const GET_LOCK: &str = r#"
    SELECT job_id, holder_identifier, acquired_at FROM job_locks WHERE input_source_path = ?1
"#;

pub const RELEASE_LOCK: &str = r#"
    DELETE FROM job_locks WHERE input_source_path = ?1 AND job_id = ?2
"#;

pub const COUNT_RESULTS_FOR_JOB: &str = r#"
    SELECT COUNT(*) FROM lead_results WHERE job_id = ?1
"#;

pub const FETCH_RESULTS_FOR_JOB: &str = r#"
    SELECT job_id, source_row_index, entity_name, director_name, registered_address,
           registered_city, registered_province, category, confidence, method,
           processing_time_ms, provider, llm_cost, retry_count, error_kind, error_message, created_at
    FROM lead_results WHERE job_id = ?1 ORDER BY source_row_index ASC
"#;

pub const INSERT_LEAD_RESULT: &str = r#"
    INSERT OR REPLACE INTO lead_results (
        job_id, source_row_index, entity_name, director_name, registered_address,
        registered_city, registered_province, category, confidence, method,
        processing_time_ms, provider, llm_cost, retry_count, error_kind, error_message, created_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
"#;
