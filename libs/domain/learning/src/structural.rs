// [libs/domain/learning/src/structural.rs]
/*!
 * APARATO: STRUCTURAL FEATURE EXTRACTION (C8 STEP 3)
 * RESPONSABILIDAD: DERIVAR RASGOS ESTRUCTURALES NUMÉRICOS DE UN NOMBRE
 *
 * token count, average token length, hyphen presence, vowel ratio, leading
 * consonant cluster flag, prefix-2/3, suffix-2/3 (spec §4.8 item 3). Feature
 * values are stored as f64 so the map can carry both counts and booleans
 * (0.0/1.0) under one schema.
 */

use leadscout_domain_models::StructuralFeatures;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

pub fn extract_structural_features(folded_name: &str, tokens: &[&str]) -> StructuralFeatures {
    let mut features = StructuralFeatures::new();

    features.insert("token_count".to_string(), tokens.len() as f64);

    let average_token_length = if tokens.is_empty() {
        0.0
    } else {
        tokens.iter().map(|token| token.chars().count()).sum::<usize>() as f64 / tokens.len() as f64
    };
    features.insert("average_token_length".to_string(), average_token_length);

    features.insert("hyphen_present".to_string(), bool_to_feature(folded_name.contains('-')));

    let letter_count = folded_name.chars().filter(|c| c.is_alphabetic()).count();
    let vowel_count = folded_name.chars().filter(|c| VOWELS.contains(c)).count();
    let vowel_ratio = if letter_count == 0 { 0.0 } else { vowel_count as f64 / letter_count as f64 };
    features.insert("vowel_ratio".to_string(), vowel_ratio);

    features.insert("leading_consonant_cluster".to_string(), bool_to_feature(has_leading_consonant_cluster(folded_name)));

    features.insert("prefix_2".to_string(), ngram_hash(folded_name, 2, true));
    features.insert("prefix_3".to_string(), ngram_hash(folded_name, 3, true));
    features.insert("suffix_2".to_string(), ngram_hash(folded_name, 2, false));
    features.insert("suffix_3".to_string(), ngram_hash(folded_name, 3, false));

    features
}

fn bool_to_feature(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn has_leading_consonant_cluster(folded_name: &str) -> bool {
    let leading: Vec<char> = folded_name.chars().take(2).collect();
    leading.len() == 2 && leading.iter().all(|c| c.is_alphabetic() && !VOWELS.contains(c))
}

/// Maps a prefix/suffix n-gram to a stable numeric id by summing byte values,
/// so the structural-feature map can carry n-gram identity without holding
/// string-typed values. The original substring itself lives on the derived
/// `LearnedPattern::pattern_value` for prefix/suffix pattern kinds.
fn ngram_hash(folded_name: &str, length: usize, leading: bool) -> f64 {
    let ngram = extract_ngram(folded_name, length, leading);
    ngram.bytes().map(|b| b as u32).sum::<u32>() as f64
}

fn extract_ngram(folded_name: &str, length: usize, leading: bool) -> String {
    let chars: Vec<char> = folded_name.chars().collect();
    if chars.len() < length {
        return String::new();
    }
    if leading {
        chars[..length].iter().collect()
    } else {
        chars[chars.len() - length..].iter().collect()
    }
}

pub fn prefix(folded_name: &str, length: usize) -> String {
    extract_ngram(folded_name, length, true)
}

pub fn suffix(folded_name: &str, length: usize) -> String {
    extract_ngram(folded_name, length, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_tokens_and_average_length() {
        let features = extract_structural_features("thabo mthembu", &["thabo", "mthembu"]);
        assert_eq!(features["token_count"], 2.0);
        assert!((features["average_token_length"] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn detects_hyphen() {
        let features = extract_structural_features("anne-marie", &["anne-marie"]);
        assert_eq!(features["hyphen_present"], 1.0);
    }

    #[test]
    fn prefix_and_suffix_extraction() {
        assert_eq!(prefix("thabo", 3), "tha");
        assert_eq!(suffix("thabo", 2), "bo");
    }
}
