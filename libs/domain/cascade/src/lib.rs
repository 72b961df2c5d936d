// [libs/domain/cascade/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CLASSIFICATION CASCADE HUB (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: ORQUESTACIÓN DEL PIPELINE DE CLASIFICACIÓN L0-L4
 * =================================================================
 */

mod errors;
mod executor;
mod phonetic_pool;
pub mod ports;

pub use errors::CascadeError;
pub use executor::{CascadeExecutor, CascadeOutcome};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use leadscout_domain_models::{CanonicalCategory, ClassificationMethod, LlmClassification};
    use ports::{ExactCacheLookup, GovernorDecision, LearnedOutcome, LearnedPatternLookup, LearningHandoff, LlmClassifier, LlmOutcome, RateGovernor};
    use std::sync::Arc;

    struct NeverCache;
    #[async_trait]
    impl ExactCacheLookup for NeverCache {
        async fn lookup_exact(&self, _normalized_name: &str) -> Option<LlmClassification> {
            None
        }
    }

    struct NeverLearned;
    #[async_trait]
    impl LearnedPatternLookup for NeverLearned {
        async fn lookup_learned(&self, _normalized_name: &str, _codes: &leadscout_core_phonetic::PhoneticCodes) -> Option<LearnedOutcome> {
            None
        }
    }

    struct RefusingLlm;
    #[async_trait]
    impl LlmClassifier for RefusingLlm {
        async fn classify(&self, _provider: leadscout_domain_models::ProviderId, _probe_name: &str) -> Result<LlmOutcome, CascadeError> {
            Err(CascadeError::AllProvidersUnavailable("test double never classifies".into()))
        }
    }

    struct ExhaustedGovernor;
    #[async_trait]
    impl RateGovernor for ExhaustedGovernor {
        async fn acquire(&self, _exclude: &[leadscout_domain_models::ProviderId]) -> GovernorDecision {
            GovernorDecision::AllProvidersExhausted
        }
        async fn report_outcome(&self, _provider: leadscout_domain_models::ProviderId, _succeeded: bool) {}
        async fn mark_exhausted(&self, _provider: leadscout_domain_models::ProviderId) {}
    }

    struct NoopHandoff;
    #[async_trait]
    impl LearningHandoff for NoopHandoff {
        async fn submit(&self, _classification: LlmClassification) {}
    }

    fn test_executor() -> CascadeExecutor {
        CascadeExecutor::new(
            Arc::new(NeverCache),
            Arc::new(NeverLearned),
            Arc::new(RefusingLlm),
            Arc::new(ExhaustedGovernor),
            Arc::new(NoopHandoff),
            100.0,
            0.85,
            0.60,
        )
    }

    #[tokio::test]
    async fn rule_dictionary_agreement_wins_at_zero_cost() {
        let executor = test_executor();
        let outcome = executor.classify("Thabo Mthembu", &|| false, 0.0).await;
        assert_eq!(outcome.method, ClassificationMethod::Rule);
        assert_eq!(outcome.category, Some(CanonicalCategory::African));
        assert_eq!(outcome.llm_cost, 0.0);
    }

    #[tokio::test]
    async fn unknown_name_with_exhausted_providers_is_unclassified_not_a_failure() {
        let executor = test_executor();
        let outcome = executor.classify("Lucky Mabena", &|| false, 0.0).await;
        assert_eq!(outcome.method, ClassificationMethod::None);
        assert_eq!(outcome.category, None);
        assert_eq!(outcome.confidence, 0.0);
    }

    #[tokio::test]
    async fn cancellation_flag_short_circuits_before_llm() {
        let executor = test_executor();
        let outcome = executor.classify("Lucky Mabena", &|| true, 0.0).await;
        assert_eq!(outcome.method, ClassificationMethod::None);
    }

    /// A governor that always proceeds with whichever provider isn't in
    /// `exclude`, paired with an LLM client that only answers for ProviderB.
    /// Exercises spec §8 scenario 5: provider A rejects, the lead fails over
    /// to B within the same probe instead of coming back Unclassified.
    struct FailoverGovernor;
    #[async_trait]
    impl RateGovernor for FailoverGovernor {
        async fn acquire(&self, exclude: &[leadscout_domain_models::ProviderId]) -> GovernorDecision {
            let provider = leadscout_domain_models::ProviderId::all()
                .iter()
                .copied()
                .find(|p| !exclude.contains(p))
                .expect("at least one provider remains");
            GovernorDecision::Proceed(provider)
        }
        async fn report_outcome(&self, _provider: leadscout_domain_models::ProviderId, _succeeded: bool) {}
        async fn mark_exhausted(&self, _provider: leadscout_domain_models::ProviderId) {}
    }

    struct QuotaExhaustedOnAThenSucceedsOnB;
    #[async_trait]
    impl LlmClassifier for QuotaExhaustedOnAThenSucceedsOnB {
        async fn classify(&self, provider: leadscout_domain_models::ProviderId, _probe_name: &str) -> Result<LlmOutcome, CascadeError> {
            match provider {
                leadscout_domain_models::ProviderId::ProviderA => Err(CascadeError::QuotaExhausted),
                leadscout_domain_models::ProviderId::ProviderB => Ok(LlmOutcome {
                    category: CanonicalCategory::African,
                    confidence: 0.90,
                    cost: 0.01,
                    classification: test_llm_classification(),
                }),
            }
        }
    }

    fn test_llm_classification() -> LlmClassification {
        LlmClassification {
            normalized_name: "zzzznotinanydictionary".to_string(),
            category: CanonicalCategory::African,
            confidence: 0.90,
            provider: leadscout_domain_models::ProviderId::ProviderB,
            cost: 0.01,
            processing_time_ms: 5,
            phonetic_codes: leadscout_core_phonetic::codes("zzzznotinanydictionary"),
            linguistic_markers: Default::default(),
            structural_features: Default::default(),
            originating_session_id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn quota_exhausted_on_one_provider_fails_over_to_the_other_within_the_same_lead() {
        let executor = CascadeExecutor::new(
            Arc::new(NeverCache),
            Arc::new(NeverLearned),
            Arc::new(QuotaExhaustedOnAThenSucceedsOnB),
            Arc::new(FailoverGovernor),
            Arc::new(NoopHandoff),
            100.0,
            0.85,
            0.60,
        );
        let outcome = executor.classify("zzzznotinanydictionary", &|| false, 0.0).await;
        assert_eq!(outcome.method, ClassificationMethod::Llm);
        assert_eq!(outcome.provider, Some(leadscout_domain_models::ProviderId::ProviderB));
        assert!(outcome.error_kind.is_none());
    }

    struct AlwaysMalformed;
    #[async_trait]
    impl LlmClassifier for AlwaysMalformed {
        async fn classify(&self, _provider: leadscout_domain_models::ProviderId, _probe_name: &str) -> Result<LlmOutcome, CascadeError> {
            Err(CascadeError::MalformedResponse("schema validation failed".into()))
        }
    }

    #[tokio::test]
    async fn malformed_response_on_every_provider_is_recorded_failed_not_unclassified() {
        let executor = CascadeExecutor::new(
            Arc::new(NeverCache),
            Arc::new(NeverLearned),
            Arc::new(AlwaysMalformed),
            Arc::new(FailoverGovernor),
            Arc::new(NoopHandoff),
            100.0,
            0.85,
            0.60,
        );
        let outcome = executor.classify("zzzznotinanydictionary", &|| false, 0.0).await;
        assert_eq!(outcome.method, ClassificationMethod::None);
        assert_eq!(outcome.error_kind.as_deref(), Some("malformed_response"));
        assert!(outcome.error_message.is_some());
    }
}
