// [libs/domain/rule-dictionary/src/lib.rs]
/*!
 * =================================================================
 * APARATO: RULE DICTIONARY RESOLVER (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: RESOLUCIÓN DE NOMBRES COMPUESTOS VÍA DICCIONARIO CURADO
 *
 * Implementa la Capa L1 de la cascada (spec §4.3): tokeniza, clasifica cada
 * token de forma independiente contra el diccionario curado, y resuelve
 * acuerdos/desacuerdos entre tokens mediante el tie-break "surname-dominates".
 * =================================================================
 */

mod dictionary_data;

pub use dictionary_data::RuleEntry;

use leadscout_core_phonetic::{fold_name, tokenize};
use leadscout_domain_models::CanonicalCategory;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

static DICTIONARY: Lazy<HashMap<&'static str, RuleEntry>> =
    Lazy::new(|| dictionary_data::ENTRIES.iter().copied().collect());

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleMatch {
    pub category: CanonicalCategory,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Matched(RuleMatch),
    Miss,
}

/// Looks up a single token in the curated dictionary, without any
/// compound-name resolution. Exposed so the phonetic layer (L2) can build
/// its candidate set from the same curated vocabulary.
pub fn lookup_token(token: &str) -> Option<RuleEntry> {
    DICTIONARY.get(token).copied()
}

/// All distinct tokens known to the curated dictionary, used by the
/// phonetic consensus layer to build its candidate pool (spec §4.2 "known
/// names").
pub fn known_tokens() -> impl Iterator<Item = &'static str> {
    DICTIONARY.keys().copied()
}

/// Resolves a raw (possibly multi-token, hyphenated) name against the
/// curated dictionary per spec §4.3's five-step procedure.
pub fn resolve(raw_name: &str) -> Resolution {
    let folded = fold_name(raw_name);
    let tokens = tokenize(&folded);
    if tokens.is_empty() {
        return Resolution::Miss;
    }

    let classified: Vec<RuleEntry> = tokens.iter().filter_map(|token| lookup_token(token)).collect();
    if classified.is_empty() {
        return Resolution::Miss;
    }

    let distinct_categories: HashSet<CanonicalCategory> = classified.iter().map(|entry| entry.category).collect();

    if distinct_categories.len() == 1 {
        let min_confidence = classified
            .iter()
            .map(|entry| entry.confidence)
            .fold(f64::INFINITY, f64::min);
        Resolution::Matched(RuleMatch { category: classified[0].category, confidence: min_confidence })
    } else {
        // Surname-dominates tie-break: the trailing classified token wins,
        // confidence scaled down to reflect the disagreement.
        let dominant = classified.last().expect("non-empty classified vec");
        Resolution::Matched(RuleMatch { category: dominant.category, confidence: dominant.confidence * 0.9 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_tokens_agree_returns_minimum_confidence() {
        // Thabo (0.95) + Mthembu (0.96) both resolve to African.
        match resolve("Thabo Mthembu") {
            Resolution::Matched(m) => {
                assert_eq!(m.category, CanonicalCategory::African);
                assert!(m.confidence >= 0.90);
            }
            Resolution::Miss => panic!("expected a match"),
        }
    }

    #[test]
    fn disagreeing_tokens_apply_surname_dominates() {
        // "Thabo Botha": Thabo -> African, Botha -> White. Trailing token (surname) wins.
        match resolve("Thabo Botha") {
            Resolution::Matched(m) => {
                assert_eq!(m.category, CanonicalCategory::White);
                assert!((m.confidence - 0.93 * 0.9).abs() < 1e-9);
            }
            Resolution::Miss => panic!("expected a match"),
        }
    }

    #[test]
    fn unknown_name_misses() {
        assert_eq!(resolve("Lucky Mabena"), Resolution::Miss);
    }

    #[test]
    fn empty_name_misses() {
        assert_eq!(resolve(""), Resolution::Miss);
    }
}
