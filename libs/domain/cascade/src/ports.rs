// [libs/domain/cascade/src/ports.rs]
/*!
 * APARATO: CASCADE PORTS (ESTRATO L2 - CONTRATOS)
 * RESPONSABILIDAD: DESACOPLAR EL EJECUTOR DE LA INFRAESTRUCTURA CONCRETA
 *
 * The cascade orchestrates layers L0-L4, but L0 (exact cache), L3 (learned
 * patterns), and L4 (paid provider + rate governor) each live behind
 * infrastructure this crate must not depend on directly -- `leadscout-infra-store`
 * depends on `leadscout-domain-models`, and a cascade -> infra-store edge would
 * close the cycle. The executor programs against these traits; the concrete
 * store/provider/governor crates implement them.
 */

use async_trait::async_trait;
use leadscout_core_phonetic::PhoneticCodes;
use leadscout_domain_models::{CanonicalCategory, LlmClassification, ProviderId};
use std::time::Duration;

/// L0: read-through lookup against previously-persisted LLM classifications,
/// keyed by the normalized (folded) name.
#[async_trait]
pub trait ExactCacheLookup: Send + Sync {
    async fn lookup_exact(&self, normalized_name: &str) -> Option<LlmClassification>;
}

/// L3: learned-pattern resolution mined by the Learning Extractor (C8).
#[async_trait]
pub trait LearnedPatternLookup: Send + Sync {
    async fn lookup_learned(&self, normalized_name: &str, codes: &PhoneticCodes) -> Option<LearnedOutcome>;
}

#[derive(Debug, Clone, Copy)]
pub struct LearnedOutcome {
    pub category: CanonicalCategory,
    pub confidence: f64,
}

/// Decision returned by the rate governor (C6) for an L4 attempt.
#[derive(Debug, Clone, Copy)]
pub enum GovernorDecision {
    Proceed(ProviderId),
    WaitFor(Duration),
    AllProvidersExhausted,
}

#[async_trait]
pub trait RateGovernor: Send + Sync {
    /// `exclude` lists providers the caller has already tried and failed
    /// over away from for the current lead; the governor picks the next
    /// live candidate outside that set.
    async fn acquire(&self, exclude: &[ProviderId]) -> GovernorDecision;
    async fn report_outcome(&self, provider: ProviderId, succeeded: bool);
    /// Marks a provider permanently exhausted for the rest of the session,
    /// independent of the gradual consecutive-failure escalation (spec
    /// §4.5: QuotaExhausted "marks provider unusable for the session").
    async fn mark_exhausted(&self, provider: ProviderId);
}

/// L4: a single paid classification call to an external provider.
#[derive(Debug, Clone)]
pub struct LlmOutcome {
    pub category: CanonicalCategory,
    pub confidence: f64,
    pub cost: f64,
    pub classification: LlmClassification,
}

#[async_trait]
pub trait LlmClassifier: Send + Sync {
    async fn classify(&self, provider: ProviderId, probe_name: &str) -> Result<LlmOutcome, crate::errors::CascadeError>;
}

/// Fire-and-forget hand-off to the Learning Extractor (C8) after a
/// sufficiently confident L4 success (spec §4.7).
#[async_trait]
pub trait LearningHandoff: Send + Sync {
    async fn submit(&self, classification: LlmClassification);
}
