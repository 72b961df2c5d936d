// [libs/domain/learning/src/derivation.rs]
/*!
 * APARATO: LEARNED PATTERN DERIVATION (C8 STEP 4-5)
 * RESPONSABILIDAD: DERIVAR HASTA K PATRONES DESDE UNA CLASIFICACIÓN LLM DE ALTA CONFIANZA
 */

use leadscout_core_phonetic::PhoneticCodes;
use leadscout_domain_models::{CanonicalCategory, LearnedPattern, LlmClassification, PatternKind};

use crate::structural;

/// Derived confidence is the LLM confidence scaled by this discount (spec
/// §4.8 item 5: "e.g., 0.9").
pub const CONFIDENCE_DISCOUNT: f64 = 0.9;
/// Upper bound on patterns derived from a single classification.
pub const MAX_DERIVED_PATTERNS: usize = 8;
/// A marker-derived pattern is only kept when the caller-supplied
/// co-occurrence fraction for that marker+category pair clears this bar.
pub const MARKER_COOCCURRENCE_THRESHOLD: f64 = 0.6;

pub fn phonetic_family_key(codes: &PhoneticCodes) -> String {
    format!(
        "{}|{}|{}|{}",
        codes.soundex,
        codes.metaphone,
        codes.double_metaphone_primary,
        codes.double_metaphone_secondary.as_deref().unwrap_or("")
    )
}

/// Derives candidate `LearnedPattern`s from a persisted high-confidence LLM
/// classification. `marker_cooccurrence` reports, for a given marker label,
/// what fraction of its past occurrences agreed with `classification.category`
/// -- this is store-wide state the pure derivation logic doesn't own, so the
/// caller (the infra-backed extractor) supplies it.
pub fn derive_patterns(classification: &LlmClassification, marker_cooccurrence: impl Fn(&str, CanonicalCategory) -> f64) -> Vec<LearnedPattern> {
    let discounted_confidence = (classification.confidence * CONFIDENCE_DISCOUNT).clamp(0.0, 1.0);
    let category = classification.category;
    let session_id = classification.originating_session_id;
    let mut patterns = Vec::new();

    patterns.push(LearnedPattern::new(
        PatternKind::PhoneticCodeFamily,
        phonetic_family_key(&classification.phonetic_codes),
        category,
        discounted_confidence,
        session_id,
    ));

    for length in [2usize, 3] {
        let prefix_value = structural::prefix(&classification.normalized_name, length);
        if !prefix_value.is_empty() {
            patterns.push(LearnedPattern::new(PatternKind::Prefix, prefix_value, category, discounted_confidence, session_id));
        }
        let suffix_value = structural::suffix(&classification.normalized_name, length);
        if !suffix_value.is_empty() {
            patterns.push(LearnedPattern::new(PatternKind::Suffix, suffix_value, category, discounted_confidence, session_id));
        }
    }

    for marker in &classification.linguistic_markers {
        if marker_cooccurrence(marker, category) >= MARKER_COOCCURRENCE_THRESHOLD {
            patterns.push(LearnedPattern::new(PatternKind::StructuralFeature, marker.clone(), category, discounted_confidence, session_id));
        }
    }

    patterns.truncate(MAX_DERIVED_PATTERNS);
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadscout_core_phonetic::codes;
    use uuid::Uuid;

    fn sample_classification() -> LlmClassification {
        LlmClassification {
            normalized_name: "thabo".to_string(),
            category: CanonicalCategory::African,
            confidence: 0.9,
            provider: leadscout_domain_models::ProviderId::ProviderA,
            cost: 0.002,
            processing_time_ms: 400,
            phonetic_codes: codes("thabo"),
            linguistic_markers: vec!["bantu-prefix-thab".to_string()],
            structural_features: Default::default(),
            originating_session_id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn derives_phonetic_family_and_affix_patterns() {
        let classification = sample_classification();
        let patterns = derive_patterns(&classification, |_, _| 0.0);
        assert!(patterns.iter().any(|p| p.pattern_kind == PatternKind::PhoneticCodeFamily));
        assert!(patterns.iter().any(|p| p.pattern_kind == PatternKind::Prefix && p.pattern_value == "th"));
        assert!(patterns.iter().any(|p| p.pattern_kind == PatternKind::Suffix && p.pattern_value == "bo"));
    }

    #[test]
    fn marker_pattern_only_kept_above_cooccurrence_threshold() {
        let classification = sample_classification();
        let below_threshold = derive_patterns(&classification, |_, _| 0.1);
        assert!(!below_threshold.iter().any(|p| p.pattern_kind == PatternKind::StructuralFeature));

        let above_threshold = derive_patterns(&classification, |_, _| 0.9);
        assert!(above_threshold.iter().any(|p| p.pattern_kind == PatternKind::StructuralFeature));
    }

    #[test]
    fn discounted_confidence_is_llm_confidence_times_09() {
        let classification = sample_classification();
        let patterns = derive_patterns(&classification, |_, _| 0.0);
        let family = patterns.iter().find(|p| p.pattern_kind == PatternKind::PhoneticCodeFamily).unwrap();
        assert!((family.derived_confidence - 0.81).abs() < 1e-9);
    }
}
