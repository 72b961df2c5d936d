// [libs/domain/models/src/lead_result.rs]
/*!
 * APARATO: LEAD RESULT DOMAIN MODEL (ESTRATO L2)
 * RESPONSABILIDAD: RESULTADO DE CLASIFICACIÓN POR FILA DE ORIGEN
 */

use crate::canonical_category::CanonicalCategory;
use crate::llm_classification::ProviderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the cascade layer that produced a result (spec §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMethod {
    ExactCache,
    Rule,
    Phonetic,
    Learned,
    Llm,
    None,
}

impl ClassificationMethod {
    pub const fn code(self) -> &'static str {
        match self {
            ClassificationMethod::ExactCache => "exact-cache",
            ClassificationMethod::Rule => "rule",
            ClassificationMethod::Phonetic => "phonetic",
            ClassificationMethod::Learned => "learned",
            ClassificationMethod::Llm => "llm",
            ClassificationMethod::None => "none",
        }
    }
}

/// Fields copied verbatim from the source row, retained so the confirmation
/// pipeline (C11) can reconstruct an exported row without re-reading the
/// source after the job completes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeadSourceFields {
    pub entity_name: String,
    pub director_name: String,
    pub registered_address: Option<String>,
    pub registered_city: Option<String>,
    pub registered_province: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadResult {
    pub job_id: Uuid,
    pub source_row_index: u64,
    pub source_fields: LeadSourceFields,
    pub category: Option<CanonicalCategory>,
    pub confidence: f64,
    pub method: ClassificationMethod,
    pub processing_time_ms: u64,
    pub provider: Option<ProviderId>,
    pub llm_cost: f64,
    pub retry_count: u32,
    pub error_kind: Option<String>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LeadResult {
    pub fn unclassified(job_id: Uuid, source_row_index: u64, source_fields: LeadSourceFields) -> Self {
        Self {
            job_id,
            source_row_index,
            source_fields,
            category: None,
            confidence: 0.0,
            method: ClassificationMethod::None,
            processing_time_ms: 0,
            provider: None,
            llm_cost: 0.0,
            retry_count: 0,
            error_kind: None,
            error_message: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error_kind.is_some()
    }
}
