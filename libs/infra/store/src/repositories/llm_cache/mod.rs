// [libs/infra/store/src/repositories/llm_cache/mod.rs]
/*!
 * =================================================================
 * APARATO: LLM CLASSIFICATION CACHE REPOSITORY (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CACHÉ L0 DE LECTURA DIRECTA Y MATERIAL CRUDO PARA C8
 *
 * One row per distinct normalized name ever sent to a paid provider. Doubles
 * as the L0 cascade cache (read path, `ExactCacheLookup`) and as the durable
 * record the Learning Extractor upserts into on every L4 success.
 * =================================================================
 */

pub mod queries;

use libsql::{params, Connection};
use std::str::FromStr;
use tracing::instrument;

use leadscout_core_phonetic::PhoneticCodes;
use leadscout_domain_models::{CanonicalCategory, LlmClassification, ProviderId};

use crate::errors::StoreError;
use self::queries as sql;

pub struct LlmCacheRepository {
    connection: Connection,
}

impl LlmCacheRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    #[instrument(skip(self, classification))]
    pub async fn upsert(&self, classification: &LlmClassification) -> Result<(), StoreError> {
        let phonetic_codes_json = serde_json::to_string(&classification.phonetic_codes).map_err(|error| StoreError::MappingError(error.to_string()))?;
        let linguistic_markers_json = serde_json::to_string(&classification.linguistic_markers).map_err(|error| StoreError::MappingError(error.to_string()))?;
        let structural_features_json = serde_json::to_string(&classification.structural_features).map_err(|error| StoreError::MappingError(error.to_string()))?;

        self.connection
            .execute(
                sql::UPSERT_CLASSIFICATION,
                params![
                    classification.normalized_name.clone(),
                    classification.category.code(),
                    classification.confidence,
                    classification.provider.label(),
                    classification.cost,
                    classification.processing_time_ms as i64,
                    phonetic_codes_json,
                    linguistic_markers_json,
                    structural_features_json,
                    classification.originating_session_id.to_string(),
                    classification.created_at.to_rfc3339(),
                ],
            )
            .await?;
        Ok(())
    }

    pub async fn get(&self, normalized_name: &str) -> Result<Option<LlmClassification>, StoreError> {
        let mut rows = self.connection.query(sql::GET_BY_NORMALIZED_NAME, params![normalized_name]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(map_row_to_classification(&row)?)),
            None => Ok(None),
        }
    }
}

fn map_row_to_classification(row: &libsql::Row) -> Result<LlmClassification, StoreError> {
    let normalized_name: String = row.get(0)?;
    let category: String = row.get(1)?;
    let confidence: f64 = row.get(2)?;
    let provider: String = row.get(3)?;
    let cost: f64 = row.get(4)?;
    let processing_time_ms: i64 = row.get(5)?;
    let phonetic_codes_json: String = row.get(6)?;
    let linguistic_markers_json: String = row.get(7)?;
    let structural_features_json: String = row.get(8)?;
    let originating_session_id: String = row.get(9)?;
    let created_at: String = row.get(10)?;

    Ok(LlmClassification {
        normalized_name,
        category: CanonicalCategory::from_str(&category).map_err(|error| StoreError::MappingError(error.to_string()))?,
        confidence,
        provider: parse_provider(&provider)?,
        cost,
        processing_time_ms: processing_time_ms as u64,
        phonetic_codes: serde_json::from_str::<PhoneticCodes>(&phonetic_codes_json).map_err(|error| StoreError::MappingError(error.to_string()))?,
        linguistic_markers: serde_json::from_str(&linguistic_markers_json).map_err(|error| StoreError::MappingError(error.to_string()))?,
        structural_features: serde_json::from_str(&structural_features_json).map_err(|error| StoreError::MappingError(error.to_string()))?,
        originating_session_id: uuid::Uuid::parse_str(&originating_session_id).map_err(|error| StoreError::MappingError(error.to_string()))?,
        created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|error| StoreError::MappingError(error.to_string()))?,
    })
}

fn parse_provider(value: &str) -> Result<ProviderId, StoreError> {
    ProviderId::all()
        .iter()
        .copied()
        .find(|provider| provider.label() == value)
        .ok_or_else(|| StoreError::MappingError(format!("unknown provider '{value}'")))
}

/// Adapter implementing the cascade's L0 read port over this repository.
pub struct ExactCacheAdapter {
    repository: LlmCacheRepository,
}

impl ExactCacheAdapter {
    pub fn new(repository: LlmCacheRepository) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl leadscout_domain_cascade::ports::ExactCacheLookup for ExactCacheAdapter {
    async fn lookup_exact(&self, normalized_name: &str) -> Option<LlmClassification> {
        match self.repository.get(normalized_name).await {
            Ok(classification) => classification,
            Err(error) => {
                tracing::warn!("L0 cache lookup failed for '{}': {}", normalized_name, error);
                None
            }
        }
    }
}
