// [libs/domain/models/src/canonical_category.rs]
/*!
 * APARATO: CANONICAL CATEGORY TABLE (ESTRATO L2)
 * RESPONSABILIDAD: CONJUNTO CERRADO DE CATEGORÍAS DEMOGRÁFICAS
 *
 * Closed enumeration per spec §3/§9: "category values are a closed
 * enumeration... extension requires schema change." Modeling it as a Rust
 * enum (rather than a free-form string column) makes every downstream
 * `match` exhaustive and makes confirmation-value validation a parse, not a
 * set-membership check against a mutable table.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalCategory {
    African,
    White,
    Coloured,
    Indian,
    Asian,
    Unknown,
}

#[derive(Debug, Error)]
#[error("REJECTED_CONFIRMATION_VALUE: '{0}' is not a canonical category")]
pub struct InvalidCategoryError(pub String);

impl CanonicalCategory {
    /// All categories, in display/sort order. Seeded into the store's
    /// `canonical_categories` table at schema-apply time.
    pub const fn all() -> &'static [CanonicalCategory] {
        &[
            CanonicalCategory::African,
            CanonicalCategory::White,
            CanonicalCategory::Coloured,
            CanonicalCategory::Indian,
            CanonicalCategory::Asian,
            CanonicalCategory::Unknown,
        ]
    }

    pub const fn sort_order(self) -> u8 {
        match self {
            CanonicalCategory::African => 0,
            CanonicalCategory::White => 1,
            CanonicalCategory::Coloured => 2,
            CanonicalCategory::Indian => 3,
            CanonicalCategory::Asian => 4,
            CanonicalCategory::Unknown => 5,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            CanonicalCategory::African => "African",
            CanonicalCategory::White => "White",
            CanonicalCategory::Coloured => "Coloured",
            CanonicalCategory::Indian => "Indian",
            CanonicalCategory::Asian => "Asian",
            CanonicalCategory::Unknown => "Unknown",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            CanonicalCategory::African => "african",
            CanonicalCategory::White => "white",
            CanonicalCategory::Coloured => "coloured",
            CanonicalCategory::Indian => "indian",
            CanonicalCategory::Asian => "asian",
            CanonicalCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CanonicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CanonicalCategory {
    type Err = InvalidCategoryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        CanonicalCategory::all()
            .iter()
            .copied()
            .find(|category| category.code() == normalized || category.display_name().to_ascii_lowercase() == normalized)
            .ok_or_else(|| InvalidCategoryError(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_code() {
        for category in CanonicalCategory::all() {
            assert_eq!(CanonicalCategory::from_str(category.code()).unwrap(), *category);
        }
    }

    #[test]
    fn rejects_unknown_value() {
        assert!(CanonicalCategory::from_str("martian").is_err());
    }

    #[test]
    fn parse_is_case_and_whitespace_insensitive() {
        assert_eq!(CanonicalCategory::from_str("  African ").unwrap(), CanonicalCategory::African);
    }
}
