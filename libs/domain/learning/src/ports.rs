// [libs/domain/learning/src/ports.rs]
/*!
 * APARATO: EXTRACTOR WRITE PORT
 * RESPONSABILIDAD: DESACOPLAR LA PERSISTENCIA DE LA DERIVACIÓN PURA
 */

use async_trait::async_trait;
use leadscout_domain_models::{CanonicalCategory, LearnedPattern, LlmClassification};

/// Write surface the Learning Extractor needs from the persistent store
/// (C1). Implemented by `leadscout-infra-store`; kept as a trait here so this
/// crate's derivation logic stays testable without a database.
#[async_trait]
pub trait LearningSink: Send + Sync {
    /// Idempotent upsert by normalized name (spec §4.1, §5: "the upsert is
    /// idempotent by normalized name").
    async fn upsert_classification(&self, classification: &LlmClassification) -> Result<(), LearningSinkError>;

    /// Persists a derived pattern, coalescing with any existing pattern of
    /// the same kind+value+category rather than duplicating it.
    async fn upsert_pattern(&self, pattern: &LearnedPattern) -> Result<(), LearningSinkError>;

    /// Fraction of past occurrences of `marker` that co-occurred with
    /// `category`, used to gate marker-derived pattern creation.
    async fn marker_cooccurrence(&self, marker: &str, category: CanonicalCategory) -> f64;
}

#[derive(Debug, thiserror::Error)]
#[error("learning sink write failed: {0}")]
pub struct LearningSinkError(pub String);
