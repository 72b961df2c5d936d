// [libs/domain/learning/src/markers.rs]
/*!
 * APARATO: LINGUISTIC MARKER TABLE (C8 STEP 2)
 * RESPONSABILIDAD: DETECCIÓN DETERMINISTA DE DÍGRAFOS/TRÍGRAFOS MORFOLÓGICOS
 *
 * A static, documented table of digraph/trigraph probes (spec §4.8 item 2).
 * Each entry names a marker and the substring (or position-qualified
 * substring) that triggers it. Deliberately small and hand-curated: this is
 * not meant to be exhaustive, only to surface morphological signal the
 * phonetic layer doesn't already capture (e.g. click-consonant digraphs).
 */

use leadscout_domain_models::LinguisticMarkers;

struct MarkerProbe {
    label: &'static str,
    substring: &'static str,
    position: Position,
}

enum Position {
    Anywhere,
    Leading,
    Trailing,
}

const MARKER_TABLE: &[MarkerProbe] = &[
    // Nguni click-consonant digraphs/trigraphs (orthographic approximations).
    MarkerProbe { label: "click-consonant-dl", substring: "dl", position: Position::Anywhere },
    MarkerProbe { label: "click-consonant-hl", substring: "hl", position: Position::Anywhere },
    MarkerProbe { label: "click-consonant-ngc", substring: "ngc", position: Position::Anywhere },
    MarkerProbe { label: "click-consonant-nx", substring: "nx", position: Position::Anywhere },
    MarkerProbe { label: "click-consonant-nq", substring: "nq", position: Position::Anywhere },
    // Bantu morphological prefixes.
    MarkerProbe { label: "bantu-prefix-nko", substring: "nko", position: Position::Leading },
    MarkerProbe { label: "bantu-prefix-mth", substring: "mth", position: Position::Leading },
    MarkerProbe { label: "bantu-prefix-ndl", substring: "ndl", position: Position::Leading },
    MarkerProbe { label: "bantu-prefix-thab", substring: "thab", position: Position::Leading },
    // Afrikaans/Dutch morphological markers.
    MarkerProbe { label: "afrikaans-prefix-van", substring: "van", position: Position::Leading },
    MarkerProbe { label: "afrikaans-infix-sch", substring: "sch", position: Position::Anywhere },
    MarkerProbe { label: "afrikaans-suffix-sen", substring: "sen", position: Position::Trailing },
    // East Asian romanization markers.
    MarkerProbe { label: "east-asian-trailing-ng", substring: "ng", position: Position::Trailing },
    MarkerProbe { label: "east-asian-leading-zh", substring: "zh", position: Position::Leading },
    // Tamil/Telugu/Gujarati trailing vowel markers.
    MarkerProbe { label: "south-asian-suffix-oo", substring: "oo", position: Position::Trailing },
    MarkerProbe { label: "south-asian-suffix-an", substring: "an", position: Position::Trailing },
];

/// Extracts every marker whose probe fires against `folded_name`. Names can
/// carry zero, one, or several markers; none firing is a valid outcome.
pub fn extract_linguistic_markers(folded_name: &str) -> LinguisticMarkers {
    MARKER_TABLE
        .iter()
        .filter(|probe| probe_fires(probe, folded_name))
        .map(|probe| probe.label.to_string())
        .collect()
}

fn probe_fires(probe: &MarkerProbe, folded_name: &str) -> bool {
    match probe.position {
        Position::Anywhere => folded_name.contains(probe.substring),
        Position::Leading => folded_name.starts_with(probe.substring),
        Position::Trailing => folded_name.ends_with(probe.substring),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_leading_bantu_prefix() {
        let markers = extract_linguistic_markers("thabo mthembu");
        assert!(markers.contains(&"bantu-prefix-thab".to_string()));
    }

    #[test]
    fn detects_click_consonant_anywhere() {
        let markers = extract_linguistic_markers("dlamini");
        assert!(markers.contains(&"click-consonant-dl".to_string()));
    }

    #[test]
    fn unrelated_name_yields_no_markers() {
        let markers = extract_linguistic_markers("smith");
        assert!(markers.is_empty());
    }
}
