// [libs/domain/cascade/src/phonetic_pool.rs]
/*!
 * APARATO: PHONETIC CANDIDATE POOL (L2 SUPPORT)
 * RESPONSABILIDAD: PRE-CALCULAR LOS CÓDIGOS FONÉTICOS DEL DICCIONARIO CURADO
 *
 * L2 evaluates a probe name against every name C3 already knows (spec §4.2,
 * §4.7: "Phonetic consensus against C3's known names"). Computing phonetic
 * codes is cheap but not free; this pool memoizes the curated vocabulary's
 * codes once per process rather than once per probe.
 */

use leadscout_core_phonetic::{codes, PhoneticCodes};
use leadscout_domain_models::CanonicalCategory;
use once_cell::sync::Lazy;

pub struct KnownName {
    pub token: &'static str,
    pub codes: PhoneticCodes,
    pub category: CanonicalCategory,
    pub confidence: f64,
}

static POOL: Lazy<Vec<KnownName>> = Lazy::new(|| {
    leadscout_domain_rules::known_tokens()
        .filter_map(|token| {
            leadscout_domain_rules::lookup_token(token).map(|entry| KnownName {
                token,
                codes: codes(token),
                category: entry.category,
                confidence: entry.confidence,
            })
        })
        .collect()
});

pub fn known_names() -> &'static [KnownName] {
    &POOL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_is_non_empty_and_self_consistent() {
        assert!(!known_names().is_empty());
        for entry in known_names() {
            assert_eq!(entry.codes, codes(entry.token));
        }
    }
}
