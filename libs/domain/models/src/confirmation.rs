// [libs/domain/models/src/confirmation.rs]
/*!
 * APARATO: CONFIRMATION DOMAIN MODEL (ESTRATO L2)
 * RESPONSABILIDAD: VEREDICTO HUMANO SOBRE UNA FILA EXPORTADA
 */

use crate::canonical_category::CanonicalCategory;
use crate::job::SourceFingerprint;
use crate::lead_result::ClassificationMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmation {
    pub source_fingerprint: SourceFingerprint,
    pub source_row_index: u64,
    pub entity_name: String,
    pub director_name: String,
    pub canonical_city: Option<String>,
    pub canonical_province: Option<String>,
    /// Hash of (city, province) used to correlate confirmations across
    /// re-exports without re-parsing free-text address fields.
    pub spatial_context_hash: u64,
    pub predicted_category: Option<CanonicalCategory>,
    pub predicted_confidence: f64,
    pub predicted_method: ClassificationMethod,
    pub confirmed_category: Option<CanonicalCategory>,
    pub confirmer_identity: Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Derives the spatial-context hash from canonical city/province, the same
/// way on export and on ingest so the two sides always agree.
pub fn spatial_context_hash(city: Option<&str>, province: Option<&str>) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    city.unwrap_or("").to_ascii_lowercase().hash(&mut hasher);
    province.unwrap_or("").to_ascii_lowercase().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spatial_hash_is_case_insensitive() {
        assert_eq!(
            spatial_context_hash(Some("Cape Town"), Some("Western Cape")),
            spatial_context_hash(Some("cape town"), Some("western cape"))
        );
    }
}
