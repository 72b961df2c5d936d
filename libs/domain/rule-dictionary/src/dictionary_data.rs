// [libs/domain/rule-dictionary/src/dictionary_data.rs]
//! Curated name-token -> (category, origin language, confidence) table.
//!
//! This is a representative seed, not an exhaustive gazetteer: the Learning
//! Extractor (C8) is the mechanism by which the system's effective
//! vocabulary grows over time (spec §4.8), so this table only needs enough
//! coverage to bootstrap the cheap layers before any LLM call has ever run.

use leadscout_domain_models::CanonicalCategory;

#[derive(Debug, Clone, Copy)]
pub struct RuleEntry {
    pub category: CanonicalCategory,
    pub origin_language: &'static str,
    pub confidence: f64,
}

pub const ENTRIES: &[(&str, RuleEntry)] = &[
    // --- Nguni / Sotho-Tswana first names and surnames (African) ---
    ("thabo", RuleEntry { category: CanonicalCategory::African, origin_language: "sotho", confidence: 0.95 }),
    ("sipho", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.95 }),
    ("nkosinathi", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.95 }),
    ("bongani", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.95 }),
    ("thandiwe", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.95 }),
    ("lindiwe", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.94 }),
    ("mandla", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.94 }),
    ("sizwe", RuleEntry { category: CanonicalCategory::African, origin_language: "xhosa", confidence: 0.93 }),
    ("zanele", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.93 }),
    ("mthembu", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.96 }),
    ("dlamini", RuleEntry { category: CanonicalCategory::African, origin_language: "swazi", confidence: 0.96 }),
    ("ndlovu", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.96 }),
    ("khumalo", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.95 }),
    ("mokoena", RuleEntry { category: CanonicalCategory::African, origin_language: "sotho", confidence: 0.95 }),
    ("sithole", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.94 }),
    ("nkosi", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.93 }),
    ("mahlangu", RuleEntry { category: CanonicalCategory::African, origin_language: "ndebele", confidence: 0.94 }),
    ("tshabalala", RuleEntry { category: CanonicalCategory::African, origin_language: "zulu", confidence: 0.95 }),
    // --- Afrikaans / Dutch-derived surnames (White) ---
    ("van", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.88 }),
    ("der", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.85 }),
    ("botha", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.93 }),
    ("pretorius", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.95 }),
    ("du", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.85 }),
    ("toit", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.88 }),
    ("viljoen", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.94 }),
    ("kruger", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.93 }),
    ("smith", RuleEntry { category: CanonicalCategory::White, origin_language: "english", confidence: 0.87 }),
    ("wessels", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.92 }),
    ("steyn", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.93 }),
    ("jacobus", RuleEntry { category: CanonicalCategory::White, origin_language: "afrikaans", confidence: 0.9 }),
    // --- Cape Malay / Coloured-associated surnames ---
    ("abrahams", RuleEntry { category: CanonicalCategory::Coloured, origin_language: "cape-malay", confidence: 0.88 }),
    ("daniels", RuleEntry { category: CanonicalCategory::Coloured, origin_language: "cape-malay", confidence: 0.86 }),
    ("petersen", RuleEntry { category: CanonicalCategory::Coloured, origin_language: "cape-malay", confidence: 0.87 }),
    ("davids", RuleEntry { category: CanonicalCategory::Coloured, origin_language: "cape-malay", confidence: 0.87 }),
    // --- Indian (Tamil/Hindi/Gujarati origin) ---
    ("naidoo", RuleEntry { category: CanonicalCategory::Indian, origin_language: "tamil", confidence: 0.95 }),
    ("pillay", RuleEntry { category: CanonicalCategory::Indian, origin_language: "tamil", confidence: 0.95 }),
    ("govender", RuleEntry { category: CanonicalCategory::Indian, origin_language: "tamil", confidence: 0.95 }),
    ("reddy", RuleEntry { category: CanonicalCategory::Indian, origin_language: "telugu", confidence: 0.93 }),
    ("patel", RuleEntry { category: CanonicalCategory::Indian, origin_language: "gujarati", confidence: 0.95 }),
    ("singh", RuleEntry { category: CanonicalCategory::Indian, origin_language: "punjabi", confidence: 0.9 }),
    ("moodley", RuleEntry { category: CanonicalCategory::Indian, origin_language: "tamil", confidence: 0.94 }),
    // --- Chinese / East Asian surnames (Asian) ---
    ("chen", RuleEntry { category: CanonicalCategory::Asian, origin_language: "mandarin", confidence: 0.92 }),
    ("wong", RuleEntry { category: CanonicalCategory::Asian, origin_language: "cantonese", confidence: 0.92 }),
    ("lee", RuleEntry { category: CanonicalCategory::Asian, origin_language: "cantonese", confidence: 0.85 }),
    ("zhang", RuleEntry { category: CanonicalCategory::Asian, origin_language: "mandarin", confidence: 0.93 }),
    ("huang", RuleEntry { category: CanonicalCategory::Asian, origin_language: "mandarin", confidence: 0.92 }),
    ("tan", RuleEntry { category: CanonicalCategory::Asian, origin_language: "hokkien", confidence: 0.87 }),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_confidence_within_rule_band() {
        for (_, entry) in ENTRIES {
            assert!(entry.confidence >= 0.85 && entry.confidence <= 1.0);
        }
    }

    #[test]
    fn no_duplicate_keys() {
        let mut seen = std::collections::HashSet::new();
        for (key, _) in ENTRIES {
            assert!(seen.insert(*key), "duplicate dictionary key: {key}");
        }
    }
}
