// [libs/infra/store/src/repositories/confirmation.rs]
/*!
 * =================================================================
 * APARATO: CONFIRMATION REPOSITORY (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: INGESTA DE VEREDICTOS HUMANOS Y REALIMENTACIÓN A L3
 *
 * Confirmations are keyed by (source fingerprint, row index) rather than by
 * entity name: the exported spreadsheet round-trips through a human and the
 * only stable join key across that trip is the row's position against the
 * fingerprinted source file (spec §4.11).
 * =================================================================
 */

use libsql::{params, Connection};
use std::str::FromStr;
use tracing::instrument;
use uuid::Uuid;

use leadscout_domain_models::{CanonicalCategory, ClassificationMethod, Confirmation, SourceFingerprint};

use crate::errors::StoreError;

const INSERT_CONFIRMATION: &str = r#"
    INSERT INTO confirmations (
        id, source_fingerprint_size_bytes, source_fingerprint_modified_at, source_row_index,
        entity_name, director_name, canonical_city, canonical_province, spatial_context_hash,
        predicted_category, predicted_confidence, predicted_method,
        confirmed_category, confirmer_identity, confirmed_at, notes
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
"#;

const LIST_UNCONFIRMED: &str = r#"
    SELECT id, source_fingerprint_size_bytes, source_fingerprint_modified_at, source_row_index,
           entity_name, director_name, canonical_city, canonical_province, spatial_context_hash,
           predicted_category, predicted_confidence, predicted_method,
           confirmed_category, confirmer_identity, confirmed_at, notes
    FROM confirmations WHERE confirmed_category IS NULL
"#;

const APPLY_CONFIRMATION: &str = r#"
    UPDATE confirmations
    SET confirmed_category = ?2, confirmer_identity = ?3, confirmed_at = ?4, notes = ?5
    WHERE id = ?1
"#;

const FIND_BY_FINGERPRINT_AND_ROW: &str = r#"
    SELECT id, source_fingerprint_size_bytes, source_fingerprint_modified_at, source_row_index,
           entity_name, director_name, canonical_city, canonical_province, spatial_context_hash,
           predicted_category, predicted_confidence, predicted_method,
           confirmed_category, confirmer_identity, confirmed_at, notes
    FROM confirmations
    WHERE source_fingerprint_size_bytes = ?1 AND source_fingerprint_modified_at = ?2 AND source_row_index = ?3
"#;

pub struct ConfirmationRepository {
    connection: Connection,
}

impl ConfirmationRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    #[instrument(skip(self, confirmation))]
    pub async fn record_export(&self, confirmation: &Confirmation) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.connection
            .execute(
                INSERT_CONFIRMATION,
                params![
                    id.to_string(),
                    confirmation.source_fingerprint.file_size_bytes as i64,
                    confirmation.source_fingerprint.modified_at_unix_seconds,
                    confirmation.source_row_index as i64,
                    confirmation.entity_name.clone(),
                    confirmation.director_name.clone(),
                    confirmation.canonical_city.clone(),
                    confirmation.canonical_province.clone(),
                    confirmation.spatial_context_hash as i64,
                    confirmation.predicted_category.map(|c| c.code().to_string()),
                    confirmation.predicted_confidence,
                    confirmation.predicted_method.code(),
                    confirmation.confirmed_category.map(|c| c.code().to_string()),
                    confirmation.confirmer_identity.clone(),
                    confirmation.confirmed_at.map(|dt| dt.to_rfc3339()),
                    confirmation.notes.clone(),
                ],
            )
            .await?;
        Ok(id)
    }

    pub async fn list_unconfirmed(&self) -> Result<Vec<(Uuid, Confirmation)>, StoreError> {
        let mut rows = self.connection.query(LIST_UNCONFIRMED, ()).await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(map_row(&row)?);
        }
        Ok(results)
    }

    pub async fn find_by_fingerprint_and_row(&self, fingerprint: SourceFingerprint, source_row_index: u64) -> Result<Option<(Uuid, Confirmation)>, StoreError> {
        let mut rows = self
            .connection
            .query(FIND_BY_FINGERPRINT_AND_ROW, params![fingerprint.file_size_bytes as i64, fingerprint.modified_at_unix_seconds, source_row_index as i64])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(map_row(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn apply_confirmation(&self, id: Uuid, confirmed_category: CanonicalCategory, confirmer_identity: &str, notes: Option<&str>) -> Result<(), StoreError> {
        let affected = self
            .connection
            .execute(APPLY_CONFIRMATION, params![id.to_string(), confirmed_category.code(), confirmer_identity, chrono::Utc::now().to_rfc3339(), notes])
            .await?;
        if affected == 0 {
            return Err(StoreError::MappingError(format!("no confirmation row with id {id}")));
        }
        Ok(())
    }
}

fn map_row(row: &libsql::Row) -> Result<(Uuid, Confirmation), StoreError> {
    let id: String = row.get(0)?;
    let file_size_bytes: i64 = row.get(1)?;
    let modified_at_unix_seconds: i64 = row.get(2)?;
    let source_row_index: i64 = row.get(3)?;
    let entity_name: String = row.get(4)?;
    let director_name: String = row.get(5)?;
    let canonical_city: Option<String> = row.get(6)?;
    let canonical_province: Option<String> = row.get(7)?;
    let spatial_context_hash: i64 = row.get(8)?;
    let predicted_category: Option<String> = row.get(9)?;
    let predicted_confidence: f64 = row.get(10)?;
    let predicted_method: String = row.get(11)?;
    let confirmed_category: Option<String> = row.get(12)?;
    let confirmer_identity: Option<String> = row.get(13)?;
    let confirmed_at: Option<String> = row.get(14)?;
    let notes: Option<String> = row.get(15)?;

    Ok((
        Uuid::parse_str(&id).map_err(|error| StoreError::MappingError(error.to_string()))?,
        Confirmation {
            source_fingerprint: SourceFingerprint { file_size_bytes: file_size_bytes as u64, modified_at_unix_seconds },
            source_row_index: source_row_index as u64,
            entity_name,
            director_name,
            canonical_city,
            canonical_province,
            spatial_context_hash: spatial_context_hash as u64,
            predicted_category: predicted_category.map(|c| CanonicalCategory::from_str(&c)).transpose().map_err(|error| StoreError::MappingError(error.to_string()))?,
            predicted_confidence,
            predicted_method: parse_method(&predicted_method)?,
            confirmed_category: confirmed_category.map(|c| CanonicalCategory::from_str(&c)).transpose().map_err(|error| StoreError::MappingError(error.to_string()))?,
            confirmer_identity,
            confirmed_at: confirmed_at
                .map(|value| chrono::DateTime::parse_from_rfc3339(&value).map(|dt| dt.with_timezone(&chrono::Utc)))
                .transpose()
                .map_err(|error| StoreError::MappingError(error.to_string()))?,
            notes,
        },
    ))
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
