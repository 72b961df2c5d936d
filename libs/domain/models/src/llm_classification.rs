// [libs/domain/models/src/llm_classification.rs]
/*!
 * APARATO: LLM CLASSIFICATION DOMAIN MODEL (ESTRATO L2)
 * RESPONSABILIDAD: CACHÉ Y FUENTE CRUDA DE APRENDIZAJE POR NOMBRE
 */

use crate::canonical_category::CanonicalCategory;
use chrono::{DateTime, Utc};
use leadscout_core_phonetic::PhoneticCodes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    ProviderA,
    ProviderB,
}

impl ProviderId {
    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::ProviderA, ProviderId::ProviderB]
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProviderId::ProviderA => "provider-a",
            ProviderId::ProviderB => "provider-b",
        }
    }
}

/// Structural features extracted for a name (spec §4.8 item 3). Stored as a
/// flat map so the learning extractor can add new feature keys without a
/// schema migration.
pub type StructuralFeatures = BTreeMap<String, f64>;

/// Deterministic linguistic markers detected for a name (spec §4.8 item 2).
pub type LinguisticMarkers = Vec<String>;

/// One row per distinct normalized name ever classified by an LLM. Doubles
/// as the L0 cache (spec §4.7) and as the raw material the Learning
/// Extractor (C8) mines into `LearnedPattern`s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmClassification {
    pub normalized_name: String,
    pub category: CanonicalCategory,
    pub confidence: f64,
    pub provider: ProviderId,
    pub cost: f64,
    pub processing_time_ms: u64,
    pub phonetic_codes: PhoneticCodes,
    pub linguistic_markers: LinguisticMarkers,
    pub structural_features: StructuralFeatures,
    pub originating_session_id: Uuid,
    pub created_at: DateTime<Utc>,
}
