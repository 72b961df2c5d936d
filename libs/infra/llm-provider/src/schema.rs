// [libs/infra/llm-provider/src/schema.rs]
/*!
 * APARATO: STRUCTURED OUTPUT CONTRACT
 * RESPONSABILIDAD: ESQUEMA FIJO DE PETICIÓN/RESPUESTA Y VALIDACIÓN
 *
 * The request always carries a fixed JSON schema enumerating the closed
 * category set (spec §4.5): the provider is asked to return exactly one of
 * these codes, never free text. `parse_response` is the single point where
 * a schema violation becomes `ProviderError::MalformedResponse`.
 */

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use leadscout_domain_models::CanonicalCategory;

use crate::errors::ProviderError;

#[derive(Debug, Serialize)]
pub struct ClassificationRequest<'a> {
    pub probe_name: &'a str,
    pub allowed_categories: &'static [&'static str],
}

impl<'a> ClassificationRequest<'a> {
    pub fn new(probe_name: &'a str) -> Self {
        Self { probe_name, allowed_categories: ALLOWED_CATEGORY_CODES }
    }
}

const ALLOWED_CATEGORY_CODES: &[&str] = &["african", "white", "coloured", "indian", "asian", "unknown"];

#[derive(Debug, Deserialize)]
pub struct UsageStats {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
pub struct ClassificationResponseEnvelope {
    pub category: String,
    pub confidence: f64,
    pub usage: UsageStats,
}

pub struct ParsedClassification {
    pub category: CanonicalCategory,
    pub confidence: f64,
    pub usage: UsageStats,
}

/// Validates a raw envelope against the closed category set and the
/// confidence domain `[0, 1]`. Any violation is a `MalformedResponse`.
pub fn parse_response(envelope: ClassificationResponseEnvelope) -> Result<ParsedClassification, ProviderError> {
    let category = CanonicalCategory::from_str(&envelope.category).map_err(|error| ProviderError::MalformedResponse(error.to_string()))?;

    if !(0.0..=1.0).contains(&envelope.confidence) {
        return Err(ProviderError::MalformedResponse(format!("confidence {} outside [0, 1]", envelope.confidence)));
    }

    Ok(ParsedClassification { category, confidence: envelope.confidence, usage: envelope.usage })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_category_outside_closed_set() {
        let envelope = ClassificationResponseEnvelope { category: "martian".into(), confidence: 0.9, usage: UsageStats { prompt_tokens: 10, completion_tokens: 2 } };
        assert!(matches!(parse_response(envelope), Err(ProviderError::MalformedResponse(_))));
    }

    #[test]
    fn rejects_confidence_outside_unit_interval() {
        let envelope = ClassificationResponseEnvelope { category: "african".into(), confidence: 1.4, usage: UsageStats { prompt_tokens: 10, completion_tokens: 2 } };
        assert!(matches!(parse_response(envelope), Err(ProviderError::MalformedResponse(_))));
    }

    #[test]
    fn accepts_well_formed_envelope() {
        let envelope = ClassificationResponseEnvelope { category: "african".into(), confidence: 0.92, usage: UsageStats { prompt_tokens: 10, completion_tokens: 2 } };
        let parsed = parse_response(envelope).expect("well-formed envelope should parse");
        assert_eq!(parsed.category, CanonicalCategory::African);
    }
}
