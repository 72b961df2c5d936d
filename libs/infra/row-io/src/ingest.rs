// [libs/infra/row-io/src/ingest.rs]
/*!
 * =================================================================
 * APARATO: CONFIRMATION INGEST (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: LECTURA DE LA HOJA DE CÁLCULO CONFIRMADA POR EL HUMANO
 *
 * Reads an exported spreadsheet back in. A row whose `confirmed_ethnicity`
 * cell is still blank yields nothing -- the export/ingest round-trip with
 * no confirmations filled in must not create or modify any Confirmation
 * row (spec §8).
 * =================================================================
 */

use std::path::Path;
use std::str::FromStr;

use csv::ReaderBuilder;
use uuid::Uuid;

use leadscout_domain_models::{spatial_context_hash, CanonicalCategory, Confirmation, SourceFingerprint};

use crate::errors::RowIoError;

/// One filled-in confirmation recovered from an ingested export.
pub struct IngestedConfirmation {
    pub job_id: Uuid,
    pub confirmation: Confirmation,
}

pub fn ingest_confirmed_rows(path: &Path, source_fingerprint: SourceFingerprint) -> Result<Vec<IngestedConfirmation>, RowIoError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let column_index = |name: &str| headers.iter().position(|header| header.eq_ignore_ascii_case(name));

    let confirmed_ethnicity_index = column_index("confirmed_ethnicity");
    let confirmation_notes_index = column_index("confirmation_notes");
    let source_row_number_index = column_index("source_row_number");
    let job_id_index = column_index("job_id");
    let entity_name_index = column_index("entity_name");
    let director_name_index = column_index("director_name");
    let director_ethnicity_index = column_index("director_ethnicity");
    let ethnicity_confidence_index = column_index("ethnicity_confidence");
    let classification_method_index = column_index("classification_method");
    let registered_city_index = column_index("registered_city");
    let registered_province_index = column_index("registered_province");

    let mut confirmations = Vec::new();

    for record_result in reader.records() {
        let record = record_result?;

        let confirmed_raw = confirmed_ethnicity_index.and_then(|index| record.get(index)).map(str::trim).filter(|value| !value.is_empty());
        let Some(confirmed_raw) = confirmed_raw else {
            continue;
        };

        let confirmed_category = CanonicalCategory::from_str(confirmed_raw).map_err(|error| RowIoError::LeadValidation(error.to_string()))?;

        let job_id = job_id_index
            .and_then(|index| record.get(index))
            .and_then(|value| Uuid::from_str(value).ok())
            .ok_or_else(|| RowIoError::LeadValidation("ingested row missing a valid job_id".to_string()))?;

        let source_row_index = source_row_number_index
            .and_then(|index| record.get(index))
            .and_then(|value| value.parse::<u64>().ok())
            .ok_or_else(|| RowIoError::LeadValidation("ingested row missing a valid source_row_number".to_string()))?;

        let registered_city = registered_city_index.and_then(|index| record.get(index)).map(str::trim).filter(|value| !value.is_empty()).map(str::to_string);
        let registered_province = registered_province_index.and_then(|index| record.get(index)).map(str::trim).filter(|value| !value.is_empty()).map(str::to_string);

        let predicted_category = director_ethnicity_index
            .and_then(|index| record.get(index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| CanonicalCategory::from_str(value).ok());

        let predicted_confidence = ethnicity_confidence_index.and_then(|index| record.get(index)).and_then(|value| value.parse::<f64>().ok()).unwrap_or(0.0);

        let predicted_method = classification_method_index
            .and_then(|index| record.get(index))
            .and_then(parse_method)
            .unwrap_or(leadscout_domain_models::ClassificationMethod::None);

        let confirmation = Confirmation {
            source_fingerprint,
            source_row_index,
            entity_name: entity_name_index.and_then(|index| record.get(index)).unwrap_or_default().to_string(),
            director_name: director_name_index.and_then(|index| record.get(index)).unwrap_or_default().to_string(),
            spatial_context_hash: spatial_context_hash(registered_city.as_deref(), registered_province.as_deref()),
            canonical_city: registered_city,
            canonical_province: registered_province,
            predicted_category,
            predicted_confidence,
            predicted_method,
            confirmed_category: Some(confirmed_category),
            confirmer_identity: None,
            confirmed_at: None,
            notes: confirmation_notes_index.and_then(|index| record.get(index)).map(str::trim).filter(|value| !value.is_empty()).map(str::to_string),
        };

        confirmations.push(IngestedConfirmation { job_id, confirmation });
    }

    Ok(confirmations)
}

fn parse_method(value: &str) -> Option<leadscout_domain_models::ClassificationMethod> {
    use leadscout_domain_models::ClassificationMethod;
    match value {
        "exact-cache" => Some(ClassificationMethod::ExactCache),
        "rule" => Some(ClassificationMethod::Rule),
        "phonetic" => Some(ClassificationMethod::Phonetic),
        "learned" => Some(ClassificationMethod::Learned),
        "llm" => Some(ClassificationMethod::Llm),
        "none" => Some(ClassificationMethod::None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_confirmed_ethnicity_yields_no_confirmation() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("export.csv");
        std::fs::write(&path, "entity_name,director_name,director_ethnicity,ethnicity_confidence,classification_method,spatial_context,processing_notes,confirmed_ethnicity,confirmation_notes,source_row_number,job_id,processed_at\nAcme,Thabo Mthembu,African,0.9,rule,,,,,0,00000000-0000-0000-0000-000000000000,\n").expect("fixture should write");

        let fingerprint = SourceFingerprint { file_size_bytes: 10, modified_at_unix_seconds: 0 };
        let confirmations = ingest_confirmed_rows(&path, fingerprint).expect("ingest should succeed");
        assert!(confirmations.is_empty());
    }

    #[test]
    fn filled_confirmed_ethnicity_is_captured() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("export.csv");
        std::fs::write(&path, "entity_name,director_name,director_ethnicity,ethnicity_confidence,classification_method,spatial_context,processing_notes,confirmed_ethnicity,confirmation_notes,source_row_number,job_id,processed_at\nAcme,Thabo Mthembu,African,0.9,rule,,,african,,0,00000000-0000-0000-0000-000000000000,\n").expect("fixture should write");

        let fingerprint = SourceFingerprint { file_size_bytes: 10, modified_at_unix_seconds: 0 };
        let confirmations = ingest_confirmed_rows(&path, fingerprint).expect("ingest should succeed");
        assert_eq!(confirmations.len(), 1);
        assert_eq!(confirmations[0].confirmation.confirmed_category, Some(CanonicalCategory::African));
    }
}
