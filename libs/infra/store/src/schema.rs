// [libs/infra/store/src/schema.rs]
/*!
 * APARATO: EMBEDDED SCHEMA (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GOBERNANZA ESTRUCTURAL E IDEMPOTENCIA DE TABLAS
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, instrument};

const TABLES: &[(&str, &str)] = &[
    ("jobs", r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id TEXT PRIMARY KEY,
            input_source_path TEXT NOT NULL,
            source_file_size_bytes INTEGER NOT NULL,
            source_modified_at_unix_seconds INTEGER NOT NULL,
            total_row_count INTEGER NOT NULL,
            batch_size INTEGER NOT NULL,
            last_committed_batch INTEGER NOT NULL DEFAULT -1,
            processed_row_count INTEGER NOT NULL DEFAULT 0,
            failed_row_count INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL,
            started_at TEXT NOT NULL,
            completed_at TEXT,
            accumulated_llm_cost REAL NOT NULL DEFAULT 0.0,
            accumulated_processing_seconds REAL NOT NULL DEFAULT 0.0,
            error_summary TEXT
        );
    "#),
    ("job_locks", r#"
        CREATE TABLE IF NOT EXISTS job_locks (
            input_source_path TEXT PRIMARY KEY,
            job_id TEXT NOT NULL,
            holder_identifier TEXT NOT NULL,
            acquired_at TEXT NOT NULL
        );
    "#),
    ("lead_results", r#"
        CREATE TABLE IF NOT EXISTS lead_results (
            job_id TEXT NOT NULL,
            source_row_index INTEGER NOT NULL,
            entity_name TEXT NOT NULL,
            director_name TEXT NOT NULL,
            registered_address TEXT,
            registered_city TEXT,
            registered_province TEXT,
            category TEXT,
            confidence REAL NOT NULL,
            method TEXT NOT NULL,
            processing_time_ms INTEGER NOT NULL,
            provider TEXT,
            llm_cost REAL NOT NULL DEFAULT 0.0,
            retry_count INTEGER NOT NULL DEFAULT 0,
            error_kind TEXT,
            error_message TEXT,
            created_at TEXT NOT NULL,
            PRIMARY KEY (job_id, source_row_index)
        );
    "#),
    ("llm_classifications", r#"
        CREATE TABLE IF NOT EXISTS llm_classifications (
            normalized_name TEXT PRIMARY KEY,
            category TEXT NOT NULL,
            confidence REAL NOT NULL,
            provider TEXT NOT NULL,
            cost REAL NOT NULL,
            processing_time_ms INTEGER NOT NULL,
            phonetic_codes_json TEXT NOT NULL,
            linguistic_markers_json TEXT NOT NULL,
            structural_features_json TEXT NOT NULL,
            originating_session_id TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    "#),
    ("learned_patterns", r#"
        CREATE TABLE IF NOT EXISTS learned_patterns (
            id TEXT PRIMARY KEY,
            pattern_kind TEXT NOT NULL,
            pattern_value TEXT NOT NULL,
            target_category TEXT NOT NULL,
            derived_confidence REAL NOT NULL,
            usage_count INTEGER NOT NULL DEFAULT 1,
            success_count INTEGER NOT NULL DEFAULT 0,
            originating_session_id TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            UNIQUE(pattern_kind, pattern_value, target_category)
        );
    "#),
    ("confirmations", r#"
        CREATE TABLE IF NOT EXISTS confirmations (
            id TEXT PRIMARY KEY,
            source_fingerprint_size_bytes INTEGER NOT NULL,
            source_fingerprint_modified_at INTEGER NOT NULL,
            source_row_index INTEGER NOT NULL,
            entity_name TEXT NOT NULL,
            director_name TEXT NOT NULL,
            canonical_city TEXT,
            canonical_province TEXT,
            spatial_context_hash INTEGER NOT NULL,
            predicted_category TEXT,
            predicted_confidence REAL NOT NULL,
            predicted_method TEXT NOT NULL,
            confirmed_category TEXT,
            confirmer_identity TEXT,
            confirmed_at TEXT,
            notes TEXT
        );
    "#),
    ("canonical_categories", r#"
        CREATE TABLE IF NOT EXISTS canonical_categories (
            code TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            sort_order INTEGER NOT NULL
        );
    "#),
];

const INDEXES: &[(&str, &str)] = &[
    ("idx_lead_results_job", "CREATE INDEX IF NOT EXISTS idx_lead_results_job ON lead_results(job_id);"),
    ("idx_learned_patterns_kind_value", "CREATE INDEX IF NOT EXISTS idx_learned_patterns_kind_value ON learned_patterns(pattern_kind, pattern_value);"),
    ("idx_confirmations_fingerprint", "CREATE INDEX IF NOT EXISTS idx_confirmations_fingerprint ON confirmations(source_fingerprint_size_bytes, source_fingerprint_modified_at, source_row_index);"),
    ("idx_llm_classifications_phonetic_codes", "CREATE INDEX IF NOT EXISTS idx_llm_classifications_phonetic_codes ON llm_classifications(phonetic_codes_json);"),
];

#[instrument(skip(connection))]
pub async fn apply_schema(connection: &Connection) -> Result<()> {
    info!("applying embedded schema");
    for (name, sql) in TABLES {
        debug!("creating table: {}", name);
        connection.execute(sql, ()).await.with_context(|| format!("failed to create table '{}'", name))?;
    }
    for (name, sql) in INDEXES {
        debug!("creating index: {}", name);
        connection.execute(sql, ()).await.with_context(|| format!("failed to create index '{}'", name))?;
    }
    seed_canonical_categories(connection).await?;
    Ok(())
}

async fn seed_canonical_categories(connection: &Connection) -> Result<()> {
    use leadscout_domain_models::CanonicalCategory;
    use libsql::params;

    for category in CanonicalCategory::all() {
        connection
            .execute(
                "INSERT OR IGNORE INTO canonical_categories (code, display_name, sort_order) VALUES (?1, ?2, ?3)",
                params![category.code(), category.display_name(), category.sort_order() as i64],
            )
            .await
            .context("failed to seed canonical_categories")?;
    }
    Ok(())
}
