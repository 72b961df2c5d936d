// [libs/core/phonetic/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PHONETIC CONSENSUS ENGINE (V1.0)
 * CLASIFICACIÓN: CORE DOMAIN-FREE UTILITY (ESTRATO L1)
 * RESPONSABILIDAD: CODIFICACIÓN FONÉTICA DETERMINISTA Y CONSENSO
 *
 * Expone las cinco codificaciones fonéticas (Soundex, Metaphone, Double
 * Metaphone primario/secundario, NYSIIS) y la regla de consenso que las
 * combina con similitud Jaro-Winkler (spec §4.2). Puro y sin estado: seguro
 * para invocación paralela desde el pool de workers de la cascada (C7).
 * =================================================================
 */

mod double_metaphone;
mod metaphone;
mod normalize;
mod nysiis;
mod soundex;

pub mod consensus;
pub mod similarity;

pub use consensus::{evaluate_consensus, ConsensusResult};
pub use normalize::{fold_name, tokenize};
pub use similarity::similarity as jaro_winkler_similarity;

use serde::{Deserialize, Serialize};

/// The five deterministic phonetic encodings computed for a single name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneticCodes {
    pub soundex: String,
    pub metaphone: String,
    pub double_metaphone_primary: String,
    pub double_metaphone_secondary: Option<String>,
    pub nysiis: String,
}

/// Computes all five phonetic codes for a raw (un-normalized) name.
pub fn codes(raw_name: &str) -> PhoneticCodes {
    let folded = fold_name(raw_name);
    let dm = double_metaphone::double_metaphone(&folded);

    PhoneticCodes {
        soundex: soundex::soundex(&folded),
        metaphone: metaphone::metaphone(&folded),
        double_metaphone_primary: dm.primary,
        double_metaphone_secondary: dm.secondary,
        nysiis: nysiis::nysiis(&folded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_deterministic() {
        assert_eq!(codes("Thabo Mthembu"), codes("Thabo Mthembu"));
    }

    #[test]
    fn empty_name_yields_empty_codes() {
        let c = codes("");
        assert_eq!(c.soundex, "");
        assert_eq!(c.metaphone, "");
    }
}
