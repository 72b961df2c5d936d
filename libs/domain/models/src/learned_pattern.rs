// [libs/domain/models/src/learned_pattern.rs]
/*!
 * APARATO: LEARNED PATTERN DOMAIN MODEL (ESTRATO L2)
 * RESPONSABILIDAD: REGLA DERIVADA DE UN ÉXITO LLM DE ALTA CONFIANZA
 */

use crate::canonical_category::CanonicalCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Prefix,
    Suffix,
    Contains,
    PhoneticCodeFamily,
    StructuralFeature,
}

impl PatternKind {
    pub const fn code(self) -> &'static str {
        match self {
            PatternKind::Prefix => "prefix",
            PatternKind::Suffix => "suffix",
            PatternKind::Contains => "contains",
            PatternKind::PhoneticCodeFamily => "phonetic-code-family",
            PatternKind::StructuralFeature => "structural-feature",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnedPattern {
    pub id: Uuid,
    pub pattern_kind: PatternKind,
    pub pattern_value: String,
    pub target_category: CanonicalCategory,
    pub derived_confidence: f64,
    pub usage_count: u64,
    pub success_count: u64,
    pub originating_session_id: Uuid,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl LearnedPattern {
    pub fn new(pattern_kind: PatternKind, pattern_value: String, target_category: CanonicalCategory, derived_confidence: f64, originating_session_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            pattern_kind,
            pattern_value,
            target_category,
            derived_confidence,
            usage_count: 1,
            success_count: 0,
            originating_session_id,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// Shrinkage estimate combining the derived confidence with observed
    /// confirmation accuracy (spec §4.4 "Effectiveness maintenance").
    /// Blends toward the empirical success rate as usage accumulates,
    /// starting fully on the derived prior when usage_count is 1 (no
    /// confirmations yet).
    pub fn effective_confidence(&self) -> f64 {
        debug_assert!(self.success_count <= self.usage_count);
        let observations = self.usage_count as f64;
        let empirical_rate = self.success_count as f64 / observations.max(1.0);
        let prior_weight = 1.0 / (1.0 + observations.max(0.0));
        (prior_weight * self.derived_confidence + (1.0 - prior_weight) * empirical_rate).clamp(0.0, 1.0)
    }

    pub fn record_usage(&mut self) {
        self.usage_count += 1;
    }

    pub fn record_confirmation(&mut self, confirmed_category: CanonicalCategory) {
        if confirmed_category == self.target_category {
            self.success_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_count_never_exceeds_usage_count() {
        let mut pattern = LearnedPattern::new(PatternKind::Prefix, "thab".into(), CanonicalCategory::African, 0.82, Uuid::new_v4());
        pattern.record_confirmation(CanonicalCategory::African);
        assert!(pattern.success_count <= pattern.usage_count);
    }

    #[test]
    fn effective_confidence_stays_within_unit_interval() {
        let pattern = LearnedPattern::new(PatternKind::Prefix, "thab".into(), CanonicalCategory::African, 0.82, Uuid::new_v4());
        let confidence = pattern.effective_confidence();
        assert!((0.0..=1.0).contains(&confidence));
    }
}
