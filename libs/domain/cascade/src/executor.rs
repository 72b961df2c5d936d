// [libs/domain/cascade/src/executor.rs]
/*!
 * =================================================================
 * APARATO: CASCADE EXECUTOR (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: DESPACHO ORDENADO POR COSTO CRECIENTE A TRAVÉS DE L0-L4
 *
 * Orders C2-C5 into the five-layer pipeline named in §4.7: L0 exact cache,
 * L1 rule dictionary, L2 phonetic consensus, L3 learned patterns, L4 paid
 * LLM. Each layer is tried in increasing cost order; the first layer to
 * clear its own confidence threshold wins. A miss on every layer yields
 * Unclassified, a valid non-error outcome.
 * =================================================================
 */

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use leadscout_core_phonetic::{codes as compute_phonetic_codes, evaluate_consensus, fold_name};
use leadscout_domain_models::{CanonicalCategory, ClassificationMethod, ProviderId};
use leadscout_domain_rules::{resolve as resolve_rule, Resolution as RuleResolution};

use crate::errors::CascadeError;
use crate::phonetic_pool::known_names;
use crate::ports::{ExactCacheLookup, GovernorDecision, LearnedPatternLookup, LearningHandoff, LlmClassifier, RateGovernor};

const L0_MIN_CONFIDENCE: f64 = 0.80;
const L1_MIN_CONFIDENCE: f64 = 0.80;
const L4_MIN_CONFIDENCE: f64 = 0.70;
const LEARNING_HANDOFF_THRESHOLD: f64 = 0.80;

/// Retries the same provider this many times on a transient failure before
/// the lead fails over to the other provider (spec §7: "retried with
/// backoff up to a configured count").
const MAX_TRANSIENT_RETRIES_PER_PROVIDER: u32 = 2;

/// A single cascade result, independent of any particular source row. The
/// job engine (C10) is responsible for stitching this into a `LeadResult`
/// alongside row-level provenance.
#[derive(Debug, Clone)]
pub struct CascadeOutcome {
    pub category: Option<CanonicalCategory>,
    pub confidence: f64,
    pub method: ClassificationMethod,
    pub provider: Option<ProviderId>,
    pub llm_cost: f64,
    pub processing_time_ms: u64,
    /// Set only when L4 exhausted every provider/retry/failover option
    /// without ever producing a usable result (spec §7: "the lead is
    /// recorded failed with this kind"). `None` everywhere else, including
    /// the ordinary "no layer matched" Unclassified outcome.
    pub error_kind: Option<String>,
    pub error_message: Option<String>,
}

impl CascadeOutcome {
    fn unclassified(elapsed_ms: u64) -> Self {
        Self {
            category: None,
            confidence: 0.0,
            method: ClassificationMethod::None,
            provider: None,
            llm_cost: 0.0,
            processing_time_ms: elapsed_ms,
            error_kind: None,
            error_message: None,
        }
    }

    fn failed(error_kind: &str, error_message: String, elapsed_ms: u64) -> Self {
        Self {
            category: None,
            confidence: 0.0,
            method: ClassificationMethod::None,
            provider: None,
            llm_cost: 0.0,
            processing_time_ms: elapsed_ms,
            error_kind: Some(error_kind.to_string()),
            error_message: Some(error_message),
        }
    }
}

pub struct CascadeExecutor {
    exact_cache: Arc<dyn ExactCacheLookup>,
    learned_patterns: Arc<dyn LearnedPatternLookup>,
    llm: Arc<dyn LlmClassifier>,
    governor: Arc<dyn RateGovernor>,
    learning_handoff: Arc<dyn LearningHandoff>,
    max_llm_cost_per_session: f64,
    phonetic_similarity_threshold: f64,
    learned_pattern_min_confidence: f64,
}

impl CascadeExecutor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        exact_cache: Arc<dyn ExactCacheLookup>,
        learned_patterns: Arc<dyn LearnedPatternLookup>,
        llm: Arc<dyn LlmClassifier>,
        governor: Arc<dyn RateGovernor>,
        learning_handoff: Arc<dyn LearningHandoff>,
        max_llm_cost_per_session: f64,
        phonetic_similarity_threshold: f64,
        learned_pattern_min_confidence: f64,
    ) -> Self {
        Self {
            exact_cache,
            learned_patterns,
            llm,
            governor,
            learning_handoff,
            max_llm_cost_per_session,
            phonetic_similarity_threshold,
            learned_pattern_min_confidence,
        }
    }

    /// Runs the full L0-L4 cascade for one probe name. `session_cost_so_far`
    /// lets the caller enforce `max_llm_cost_per_session` across many calls
    /// without this executor owning session-lifetime state.
    #[instrument(skip(self), fields(probe = %probe_name))]
    pub async fn classify(&self, probe_name: &str, cancelled: &dyn Fn() -> bool, session_cost_so_far: f64) -> CascadeOutcome {
        let ignition = Instant::now();
        let normalized = fold_name(probe_name);

        // L0: exact cache hit against a previously-persisted LLM classification.
        if let Some(cached) = self.exact_cache.lookup_exact(&normalized).await {
            if cached.confidence >= L0_MIN_CONFIDENCE {
                debug!("L0 cache hit for '{}'", normalized);
                return CascadeOutcome {
                    category: Some(cached.category),
                    confidence: cached.confidence,
                    method: ClassificationMethod::ExactCache,
                    provider: Some(cached.provider),
                    llm_cost: 0.0,
                    processing_time_ms: ignition.elapsed().as_millis() as u64,
                    error_kind: None,
                    error_message: None,
                };
            }
        }

        if cancelled() {
            return CascadeOutcome::unclassified(ignition.elapsed().as_millis() as u64);
        }

        // L1: curated rule dictionary.
        if let RuleResolution::Matched(rule_match) = resolve_rule(probe_name) {
            if rule_match.confidence >= L1_MIN_CONFIDENCE {
                debug!("L1 rule hit for '{}': {:?}", normalized, rule_match.category);
                return CascadeOutcome {
                    category: Some(rule_match.category),
                    confidence: rule_match.confidence,
                    method: ClassificationMethod::Rule,
                    provider: None,
                    llm_cost: 0.0,
                    processing_time_ms: ignition.elapsed().as_millis() as u64,
                    error_kind: None,
                    error_message: None,
                };
            }
        }

        if cancelled() {
            return CascadeOutcome::unclassified(ignition.elapsed().as_millis() as u64);
        }

        // L2: phonetic consensus against the rule dictionary's vocabulary.
        let probe_codes = compute_phonetic_codes(probe_name);
        if let Some(outcome) = self.phonetic_layer(probe_name, &probe_codes) {
            debug!("L2 phonetic consensus hit for '{}'", normalized);
            return CascadeOutcome { processing_time_ms: ignition.elapsed().as_millis() as u64, ..outcome };
        }

        if cancelled() {
            return CascadeOutcome::unclassified(ignition.elapsed().as_millis() as u64);
        }

        // L3: learned patterns mined from prior L4 successes.
        if let Some(learned) = self.learned_patterns.lookup_learned(&normalized, &probe_codes).await {
            if learned.confidence >= self.learned_pattern_min_confidence {
                debug!("L3 learned-pattern hit for '{}'", normalized);
                return CascadeOutcome {
                    category: Some(learned.category),
                    confidence: learned.confidence,
                    method: ClassificationMethod::Learned,
                    provider: None,
                    llm_cost: 0.0,
                    processing_time_ms: ignition.elapsed().as_millis() as u64,
                    error_kind: None,
                    error_message: None,
                };
            }
        }

        if cancelled() {
            return CascadeOutcome::unclassified(ignition.elapsed().as_millis() as u64);
        }

        // L4: paid LLM call, serialized through the rate governor's grants.
        if session_cost_so_far >= self.max_llm_cost_per_session {
            warn!("max_llm_cost_per_session reached, skipping L4 for '{}'", normalized);
            return CascadeOutcome::unclassified(ignition.elapsed().as_millis() as u64);
        }

        match self.run_llm_layer(probe_name, cancelled).await {
            LlmLayerResult::Success(layer_outcome) => {
                if layer_outcome.confidence >= LEARNING_HANDOFF_THRESHOLD {
                    if let Some(classification) = layer_outcome.llm_classification.clone() {
                        self.learning_handoff.submit(classification).await;
                    }
                }
                let mut outcome: CascadeOutcome = layer_outcome.into();
                outcome.processing_time_ms = ignition.elapsed().as_millis() as u64;
                outcome
            }
            LlmLayerResult::Unclassified => CascadeOutcome::unclassified(ignition.elapsed().as_millis() as u64),
            LlmLayerResult::Failed { kind, message } => {
                CascadeOutcome::failed(kind, message, ignition.elapsed().as_millis() as u64)
            }
        }
    }

    fn phonetic_layer(&self, probe_name: &str, probe_codes: &leadscout_core_phonetic::PhoneticCodes) -> Option<CascadeOutcome> {
        let mut best: Option<(CanonicalCategory, f64)> = None;

        for known in known_names() {
            let result = evaluate_consensus(probe_name, known.token, probe_codes, &known.codes, self.phonetic_similarity_threshold);
            if result.accepted {
                let scaled_confidence = result.confidence.min(known.confidence);
                let replace = match best {
                    Some((_, current_best)) => scaled_confidence > current_best,
                    None => true,
                };
                if replace {
                    best = Some((known.category, scaled_confidence));
                }
            }
        }

        best.map(|(category, confidence)| CascadeOutcome {
            category: Some(category),
            confidence,
            method: ClassificationMethod::Phonetic,
            provider: None,
            llm_cost: 0.0,
            processing_time_ms: 0,
            error_kind: None,
            error_message: None,
        })
    }

    /// Tries L4 across providers, applying the per-kind policy from spec §7:
    /// transient failures retry in place up to
    /// `MAX_TRANSIENT_RETRIES_PER_PROVIDER` times before failing over,
    /// rate-limited waits on the governor's own backoff, quota-exhausted and
    /// malformed-response fail over immediately, and once every provider has
    /// been excluded the lead is recorded failed with the last kind seen.
    async fn run_llm_layer(&self, probe_name: &str, cancelled: &dyn Fn() -> bool) -> LlmLayerResult {
        let mut excluded: Vec<ProviderId> = Vec::new();
        let mut transient_retries_on_current: u32 = 0;
        let mut current_provider: Option<ProviderId> = None;
        let mut last_failure: Option<(&'static str, String)> = None;

        loop {
            if cancelled() {
                return LlmLayerResult::Unclassified;
            }

            if excluded.len() >= ProviderId::all().len() {
                return match last_failure {
                    Some((kind, message)) => LlmLayerResult::Failed { kind, message },
                    None => LlmLayerResult::Unclassified,
                };
            }

            match self.governor.acquire(&excluded).await {
                GovernorDecision::Proceed(provider) => {
                    if current_provider != Some(provider) {
                        current_provider = Some(provider);
                        transient_retries_on_current = 0;
                    }

                    match self.llm.classify(provider, probe_name).await {
                        Ok(outcome) if outcome.confidence >= L4_MIN_CONFIDENCE => {
                            self.governor.report_outcome(provider, true).await;
                            info!("L4 success via {:?} for '{}'", provider, probe_name);
                            return LlmLayerResult::Success(LlmLayerOutcome {
                                category: outcome.category,
                                confidence: outcome.confidence,
                                provider,
                                cost: outcome.cost,
                                llm_classification: Some(outcome.classification),
                            });
                        }
                        Ok(_) => {
                            self.governor.report_outcome(provider, true).await;
                            return LlmLayerResult::Unclassified;
                        }
                        Err(CascadeError::Transient(message)) => {
                            warn!("L4 transient failure via {:?} for '{}': {}", provider, probe_name, message);
                            self.governor.report_outcome(provider, false).await;
                            last_failure = Some(("transient_provider_error", message));
                            transient_retries_on_current += 1;
                            if transient_retries_on_current > MAX_TRANSIENT_RETRIES_PER_PROVIDER {
                                excluded.push(provider);
                            }
                        }
                        Err(CascadeError::RateLimited) => {
                            debug!("L4 rate-limited via {:?} for '{}', awaiting governor", provider, probe_name);
                            self.governor.report_outcome(provider, false).await;
                            last_failure = Some(("rate_limited", "provider rate-limited the request".to_string()));
                        }
                        Err(CascadeError::QuotaExhausted) => {
                            warn!("L4 quota exhausted via {:?} for '{}', failing over", provider, probe_name);
                            self.governor.report_outcome(provider, false).await;
                            self.governor.mark_exhausted(provider).await;
                            last_failure = Some(("quota_exhausted", "provider quota exhausted".to_string()));
                            excluded.push(provider);
                        }
                        Err(CascadeError::MalformedResponse(message)) => {
                            warn!("L4 malformed response via {:?} for '{}': {}", provider, probe_name, message);
                            self.governor.report_outcome(provider, false).await;
                            last_failure = Some(("malformed_response", message));
                            excluded.push(provider);
                        }
                        Err(CascadeError::MissingCredential) => {
                            warn!("L4 missing credential for {:?}, failing over", provider);
                            last_failure = Some(("missing_credential", "no credential configured for provider".to_string()));
                            excluded.push(provider);
                        }
                        Err(other) => {
                            warn!("L4 call via {:?} failed: {}", provider, other);
                            self.governor.report_outcome(provider, false).await;
                            last_failure = Some(("provider_error", other.to_string()));
                            excluded.push(provider);
                        }
                    }
                }
                GovernorDecision::WaitFor(duration) => {
                    tokio::time::sleep(duration).await;
                    continue;
                }
                GovernorDecision::AllProvidersExhausted => {
                    warn!("both providers exhausted, '{}' falls through to Unclassified", probe_name);
                    return LlmLayerResult::Unclassified;
                }
            }
        }
    }
}

enum LlmLayerResult {
    Success(LlmLayerOutcome),
    Unclassified,
    Failed { kind: &'static str, message: String },
}

struct LlmLayerOutcome {
    category: CanonicalCategory,
    confidence: f64,
    provider: ProviderId,
    cost: f64,
    llm_classification: Option<leadscout_domain_models::LlmClassification>,
}

impl From<LlmLayerOutcome> for CascadeOutcome {
    fn from(value: LlmLayerOutcome) -> Self {
        CascadeOutcome {
            category: Some(value.category),
            confidence: value.confidence,
            method: ClassificationMethod::Llm,
            provider: Some(value.provider),
            llm_cost: value.cost,
            processing_time_ms: 0,
            error_kind: None,
            error_message: None,
        }
    }
}
