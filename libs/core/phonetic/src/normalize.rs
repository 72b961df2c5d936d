// [libs/core/phonetic/src/normalize.rs]
//! Normalización previa a cualquier codificación fonética.

use unicode_normalization::UnicodeNormalization;

/// Pliega diacríticos, colapsa espacios en blanco y convierte a minúsculas.
/// Los guiones se preservan: son significativos para el análisis de nombres
/// compuestos (C3's "surname-dominates" tie-break opera sobre tokens separados
/// por guion).
pub fn fold_name(raw_name: &str) -> String {
    let decomposed: String = raw_name.nfd().filter(|c| !is_combining_mark(*c)).collect();

    let mut folded = String::with_capacity(decomposed.len());
    let mut last_was_space = false;

    for ch in decomposed.chars() {
        let lowered = ch.to_ascii_lowercase();
        if lowered.is_whitespace() {
            if !last_was_space && !folded.is_empty() {
                folded.push(' ');
            }
            last_was_space = true;
        } else if lowered == '-' || lowered.is_alphanumeric() {
            folded.push(lowered);
            last_was_space = false;
        }
        // other punctuation is dropped silently
    }

    folded.trim().to_string()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F)
}

/// Splits a folded name into tokens on whitespace and hyphen, as required by
/// the rule dictionary's compound-name resolution (spec §4.3).
pub fn tokenize(folded_name: &str) -> Vec<&str> {
    folded_name
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_diacritics_and_case() {
        assert_eq!(fold_name("Ìñígo"), "inigo");
    }

    #[test]
    fn preserves_hyphen() {
        assert_eq!(fold_name("Jean-Pierre"), "jean-pierre");
    }

    #[test]
    fn tokenizes_on_space_and_hyphen() {
        assert_eq!(tokenize("jean-pierre du mont"), vec!["jean", "pierre", "du", "mont"]);
    }
}
