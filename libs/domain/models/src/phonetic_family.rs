// [libs/domain/models/src/phonetic_family.rs]
/*!
 * APARATO: PHONETIC FAMILY DOMAIN MODEL (ESTRATO L2)
 * RESPONSABILIDAD: CONSENSO ACUMULADO POR TUPLA DE CÓDIGOS FONÉTICOS
 */

use crate::canonical_category::CanonicalCategory;
use leadscout_core_phonetic::PhoneticCodes;
use serde::{Deserialize, Serialize};

/// A tuple of phonetic codes mapped to the category that has accumulated
/// the most supporting LLM evidence (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneticFamily {
    pub codes: PhoneticCodes,
    pub majority_category: CanonicalCategory,
    pub confidence: f64,
    pub supporting_evidence_count: u64,
}

impl PhoneticFamily {
    /// Folds in one additional piece of supporting evidence. If the new
    /// evidence names a different category than the current majority and
    /// outweighs it, the majority flips.
    pub fn absorb(&mut self, category: CanonicalCategory, category_evidence_weight: u64) {
        self.supporting_evidence_count += category_evidence_weight;
        if category != self.majority_category {
            // A simple running count per observed category would require a
            // full histogram; since this is an incremental online update we
            // only flip the majority when the incoming signal alone would
            // outweigh everything accumulated so far, a conservative bound.
            if category_evidence_weight > self.supporting_evidence_count / 2 {
                self.majority_category = category;
            }
        }
        self.confidence = ((self.confidence * (self.supporting_evidence_count - category_evidence_weight) as f64
            + category_evidence_weight as f64)
            / self.supporting_evidence_count as f64)
            .clamp(0.0, 1.0);
    }
}
