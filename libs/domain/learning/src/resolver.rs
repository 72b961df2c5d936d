// [libs/domain/learning/src/resolver.rs]
/*!
 * APARATO: LEARNED-PATTERN RESOLVER (C4 LOOKUP)
 * RESPONSABILIDAD: APLICAR EL ORDEN DE BÚSQUEDA DE §4.4 SOBRE UN CONJUNTO DE CANDIDATOS
 *
 * Pure matching logic: given a probe and the candidate `LearnedPattern` rows
 * a caller already fetched from storage, picks the first tier with a hit in
 * lookup order (exact normalized -> phonetic-family -> prefix/suffix ->
 * structural-feature) and returns the highest effective-confidence pattern
 * within that tier. Storage concerns (which rows to fetch) are the infra
 * layer's job; this module never touches a database.
 *
 * "Exact normalized match" has no dedicated `PatternKind`: it is the
 * degenerate case where a stored prefix/suffix/phonetic-family pattern's
 * `pattern_value` happens to equal the probe's full normalized name (this
 * occurs naturally for very short names), so it is checked first across all
 * kinds rather than modeled as a sixth kind.
 */

use leadscout_core_phonetic::PhoneticCodes;
use leadscout_domain_cascade::ports::LearnedOutcome;
use leadscout_domain_models::{LearnedPattern, PatternKind};

use crate::derivation::phonetic_family_key;
use crate::markers::extract_linguistic_markers;

pub fn resolve_against_candidates(normalized_name: &str, probe_codes: &PhoneticCodes, candidates: &[LearnedPattern]) -> Option<LearnedOutcome> {
    let active: Vec<&LearnedPattern> = candidates.iter().filter(|pattern| pattern.active).collect();

    if let Some(outcome) = best_match(active.iter().copied().filter(|pattern| pattern.pattern_value == normalized_name)) {
        return Some(outcome);
    }

    let family_key = phonetic_family_key(probe_codes);
    if let Some(outcome) = best_match(
        active
            .iter()
            .copied()
            .filter(|pattern| pattern.pattern_kind == PatternKind::PhoneticCodeFamily && pattern.pattern_value == family_key),
    ) {
        return Some(outcome);
    }

    if let Some(outcome) = best_match(active.iter().copied().filter(|pattern| is_affix_match(pattern, normalized_name))) {
        return Some(outcome);
    }

    let firing_markers = extract_linguistic_markers(normalized_name);
    if let Some(outcome) = best_match(
        active
            .iter()
            .copied()
            .filter(|pattern| pattern.pattern_kind == PatternKind::StructuralFeature && firing_markers.contains(&pattern.pattern_value)),
    ) {
        return Some(outcome);
    }

    None
}

fn is_affix_match(pattern: &LearnedPattern, normalized_name: &str) -> bool {
    match pattern.pattern_kind {
        PatternKind::Prefix => normalized_name.starts_with(pattern.pattern_value.as_str()),
        PatternKind::Suffix => normalized_name.ends_with(pattern.pattern_value.as_str()),
        _ => false,
    }
}

fn best_match<'a>(candidates: impl Iterator<Item = &'a LearnedPattern>) -> Option<LearnedOutcome> {
    candidates
        .max_by(|a, b| a.effective_confidence().partial_cmp(&b.effective_confidence()).unwrap_or(std::cmp::Ordering::Equal))
        .map(|pattern| LearnedOutcome { category: pattern.target_category, confidence: pattern.effective_confidence() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadscout_core_phonetic::codes;
    use leadscout_domain_models::CanonicalCategory;
    use uuid::Uuid;

    fn pattern(kind: PatternKind, value: &str, category: CanonicalCategory) -> LearnedPattern {
        LearnedPattern::new(kind, value.to_string(), category, 0.85, Uuid::new_v4())
    }

    #[test]
    fn prefix_match_is_found_when_family_misses() {
        let probe_codes = codes("thabang");
        let candidates = vec![pattern(PatternKind::Prefix, "thab", CanonicalCategory::African)];
        let outcome = resolve_against_candidates("thabang", &probe_codes, &candidates).unwrap();
        assert_eq!(outcome.category, CanonicalCategory::African);
    }

    #[test]
    fn no_candidates_yields_none() {
        let probe_codes = codes("thabang");
        assert!(resolve_against_candidates("thabang", &probe_codes, &[]).is_none());
    }

    #[test]
    fn exact_normalized_value_wins_over_prefix() {
        let probe_codes = codes("li");
        let candidates = vec![pattern(PatternKind::Prefix, "li", CanonicalCategory::Asian)];
        let outcome = resolve_against_candidates("li", &probe_codes, &candidates).unwrap();
        assert_eq!(outcome.category, CanonicalCategory::Asian);
    }
}
