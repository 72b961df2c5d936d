// [libs/core/phonetic/tests/consensus_properties.rs]
//! Property tests for the phonetic consensus rule (spec §4.2, §8).

use leadscout_core_phonetic::consensus::{evaluate_consensus, DEFAULT_SIMILARITY_THRESHOLD};
use leadscout_core_phonetic::codes;
use proptest::prelude::*;

proptest! {
    /// Every accepted consensus carries a confidence inside the documented
    /// 0.70-0.95 band; every rejection carries zero confidence.
    #[test]
    fn confidence_is_bounded(a in "[a-z]{3,12}", b in "[a-z]{3,12}") {
        let probe = codes(&a);
        let candidate = codes(&b);
        let result = evaluate_consensus(&a, &b, &probe, &candidate, DEFAULT_SIMILARITY_THRESHOLD);

        if result.accepted {
            prop_assert!(result.confidence >= 0.70 && result.confidence <= 0.95);
        } else {
            prop_assert_eq!(result.confidence, 0.0);
        }
    }

    /// A name always reaches consensus with itself at maximum confidence.
    #[test]
    fn identical_names_always_accepted(a in "[a-z]{3,12}") {
        let probe = codes(&a);
        let result = evaluate_consensus(&a, &a, &probe, &probe, DEFAULT_SIMILARITY_THRESHOLD);
        prop_assert!(result.accepted);
        prop_assert!((result.confidence - 0.95).abs() < 1e-9);
    }
}
