// [libs/domain/learning/src/extractor.rs]
/*!
 * =================================================================
 * APARATO: LEARNING EXTRACTOR (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: MINAR ARTEFACTOS DERIVADOS DE UN ÉXITO L4 DE ALTA CONFIANZA
 *
 * Implements `leadscout_domain_cascade::ports::LearningHandoff`, the trait
 * the cascade hands an `LlmClassification` to after an L4 success with
 * confidence >= 0.80 (spec §4.7, §4.8). "Extractor failures never block the
 * cascade's return value" (§4.8): the cascade already returned its own
 * result before this runs, so a sink failure here is logged and swallowed,
 * never propagated back up.
 * =================================================================
 */

use async_trait::async_trait;
use tracing::{error, instrument, warn};

use leadscout_domain_cascade::ports::LearningHandoff;
use leadscout_domain_models::LlmClassification;

use crate::derivation::derive_patterns;
use crate::ports::LearningSink;
use std::sync::Arc;

pub struct LearningExtractor {
    sink: Arc<dyn LearningSink>,
}

impl LearningExtractor {
    pub fn new(sink: Arc<dyn LearningSink>) -> Self {
        Self { sink }
    }

    #[instrument(skip(self, classification), fields(name = %classification.normalized_name))]
    async fn extract_and_persist(&self, classification: LlmClassification) {
        if let Err(error) = self.sink.upsert_classification(&classification).await {
            error!("failed to persist LLM classification: {}", error);
            return;
        }

        // `derive_patterns` is pure/sync, but the co-occurrence fractions it
        // needs live in the store; resolve them for every candidate marker
        // up front so the derivation pass itself touches no I/O.
        let mut cooccurrence = std::collections::HashMap::new();
        for marker in &classification.linguistic_markers {
            let fraction = self.sink.marker_cooccurrence(marker, classification.category).await;
            cooccurrence.insert(marker.clone(), fraction);
        }

        let patterns = derive_patterns(&classification, |marker, _category| *cooccurrence.get(marker).unwrap_or(&0.0));

        for pattern in &patterns {
            if let Err(error) = self.sink.upsert_pattern(pattern).await {
                warn!("failed to persist derived pattern {:?}={}: {}", pattern.pattern_kind, pattern.pattern_value, error);
            }
        }
    }
}

#[async_trait]
impl LearningHandoff for LearningExtractor {
    async fn submit(&self, classification: LlmClassification) {
        self.extract_and_persist(classification).await;
    }
}
