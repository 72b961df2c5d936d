// [libs/domain/learning/src/lib.rs]
/*!
 * =================================================================
 * APARATO: LEARNING DOMAIN HUB (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: MINERÍA DE PATRONES (C8) Y RESOLUCIÓN L3 (C4)
 * =================================================================
 */

pub mod derivation;
pub mod extractor;
pub mod markers;
pub mod ports;
pub mod resolver;
pub mod structural;

pub use derivation::{derive_patterns, phonetic_family_key};
pub use extractor::LearningExtractor;
pub use markers::extract_linguistic_markers;
pub use ports::{LearningSink, LearningSinkError};
pub use resolver::resolve_against_candidates;
pub use structural::extract_structural_features;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use leadscout_core_phonetic::codes;
    use leadscout_domain_models::{CanonicalCategory, LearnedPattern, LlmClassification, ProviderId};
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingSink {
        classifications: Mutex<Vec<LlmClassification>>,
        patterns: Mutex<Vec<LearnedPattern>>,
    }

    #[async_trait]
    impl LearningSink for RecordingSink {
        async fn upsert_classification(&self, classification: &LlmClassification) -> Result<(), LearningSinkError> {
            self.classifications.lock().unwrap().push(classification.clone());
            Ok(())
        }

        async fn upsert_pattern(&self, pattern: &LearnedPattern) -> Result<(), LearningSinkError> {
            self.patterns.lock().unwrap().push(pattern.clone());
            Ok(())
        }

        async fn marker_cooccurrence(&self, _marker: &str, _category: CanonicalCategory) -> f64 {
            0.8
        }
    }

    #[tokio::test]
    async fn submit_persists_classification_and_derived_patterns() {
        use leadscout_domain_cascade::ports::LearningHandoff;

        let sink = Arc::new(RecordingSink::default());
        let extractor = LearningExtractor::new(sink.clone());

        let classification = LlmClassification {
            normalized_name: "thabo".to_string(),
            category: CanonicalCategory::African,
            confidence: 0.92,
            provider: ProviderId::ProviderA,
            cost: 0.003,
            processing_time_ms: 512,
            phonetic_codes: codes("thabo"),
            linguistic_markers: vec!["bantu-prefix-thab".to_string()],
            structural_features: Default::default(),
            originating_session_id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
        };

        extractor.submit(classification).await;

        assert_eq!(sink.classifications.lock().unwrap().len(), 1);
        assert!(!sink.patterns.lock().unwrap().is_empty());
        assert!(sink.patterns.lock().unwrap().iter().any(|p| p.pattern_kind == leadscout_domain_models::PatternKind::StructuralFeature));
    }
}
