// [libs/infra/llm-provider/src/lib.rs]
/*!
 * =================================================================
 * APARATO: LLM PROVIDER ADAPTER (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: L4 DEL CASCADE Y MATERIAL CRUDO PARA C8
 *
 * Implements `leadscout_domain_cascade::ports::LlmClassifier`: a single
 * call to a named provider, turned into the full `LlmClassification` the
 * Learning Extractor (C8) needs, with phonetic codes, linguistic markers,
 * and structural features computed locally rather than trusted from the
 * provider response.
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod schema;

pub use client::{LlmProviderClient, ProviderCredential};
pub use errors::ProviderError;

use chrono::Utc;
use uuid::Uuid;

use leadscout_core_phonetic::codes as phonetic_codes;
use leadscout_domain_cascade::ports::{LlmClassifier, LlmOutcome};
use leadscout_domain_cascade::CascadeError;
use leadscout_domain_learning::{extract_linguistic_markers, extract_structural_features};
use leadscout_domain_models::{LlmClassification, ProviderId};

pub struct LlmClassifierAdapter {
    client: LlmProviderClient,
}

impl LlmClassifierAdapter {
    pub fn new(client: LlmProviderClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl LlmClassifier for LlmClassifierAdapter {
    async fn classify(&self, provider: ProviderId, probe_name: &str) -> Result<LlmOutcome, CascadeError> {
        let (parsed, cost) = self.client.classify(provider, probe_name).await.map_err(map_provider_error)?;

        let normalized_name = leadscout_core_phonetic::fold_name(probe_name);
        let tokens = leadscout_core_phonetic::tokenize(&normalized_name);
        let codes = phonetic_codes(probe_name);
        let linguistic_markers = extract_linguistic_markers(&normalized_name);
        let structural_features = extract_structural_features(&normalized_name, &tokens);

        let classification = LlmClassification {
            normalized_name,
            category: parsed.category,
            confidence: parsed.confidence,
            provider,
            cost,
            processing_time_ms: 0,
            phonetic_codes: codes,
            linguistic_markers,
            structural_features,
            originating_session_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        Ok(LlmOutcome { category: parsed.category, confidence: parsed.confidence, cost, classification })
    }
}

/// Preserves the provider's failure kind rather than collapsing it to a
/// string, so `CascadeExecutor` can retry, fail over, or give up per-kind
/// (spec §4.5, §7).
fn map_provider_error(error: ProviderError) -> CascadeError {
    match error {
        ProviderError::Transient(reason) => CascadeError::Transient(reason),
        ProviderError::RateLimited => CascadeError::RateLimited,
        ProviderError::QuotaExhausted => CascadeError::QuotaExhausted,
        ProviderError::MalformedResponse(reason) => CascadeError::MalformedResponse(reason),
        ProviderError::MissingCredential => CascadeError::MissingCredential,
    }
}
