// [libs/infra/row-io/src/writer.rs]
/*!
 * =================================================================
 * APARATO: ENRICHED EXPORT WRITER (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: EXPORTACIÓN TABULAR ENRIQUECIDA Y LEYENDA DE VALIDACIÓN
 *
 * Every input column survives verbatim, then the classification columns
 * named in spec §6 are appended. `confirmed_ethnicity` is left blank for
 * the human reviewer; the sidecar legend file lists the closed category
 * set so spreadsheet tools can wire their own data-validation dropdown
 * against it (native dropdown lists themselves are out of scope, per
 * spec.md §1's "treated as an opaque tabular source/sink").
 * =================================================================
 */

use std::path::Path;

use csv::{StringRecord, Writer};

use leadscout_domain_models::{CanonicalCategory, LeadResult};

use crate::errors::RowIoError;

const ENRICHMENT_COLUMNS: &[&str] = &[
    "director_ethnicity",
    "ethnicity_confidence",
    "classification_method",
    "spatial_context",
    "processing_notes",
    "confirmed_ethnicity",
    "confirmation_notes",
    "source_row_number",
    "job_id",
    "processed_at",
];

pub struct ExportRow<'a> {
    pub original: &'a StringRecord,
    pub result: &'a LeadResult,
}

pub struct ExportWriter {
    writer: Writer<std::fs::File>,
}

impl ExportWriter {
    pub fn create(path: &Path, original_headers: &StringRecord) -> Result<Self, RowIoError> {
        let mut writer = Writer::from_path(path)?;

        let mut header_row: Vec<&str> = original_headers.iter().collect();
        header_row.extend_from_slice(ENRICHMENT_COLUMNS);
        writer.write_record(&header_row)?;

        Ok(Self { writer })
    }

    pub fn write_row(&mut self, row: ExportRow<'_>) -> Result<(), RowIoError> {
        let mut record: Vec<String> = row.original.iter().map(str::to_string).collect();

        let spatial_context = join_spatial_context(row.result.source_fields.registered_city.as_deref(), row.result.source_fields.registered_province.as_deref());
        let processing_notes = row.result.error_message.clone().unwrap_or_default();

        record.push(row.result.category.map(|c| c.display_name().to_string()).unwrap_or_default());
        record.push(format!("{:.4}", row.result.confidence));
        record.push(row.result.method.code().to_string());
        record.push(spatial_context);
        record.push(processing_notes);
        record.push(String::new()); // confirmed_ethnicity: left blank for the reviewer
        record.push(String::new()); // confirmation_notes
        record.push(row.result.source_row_index.to_string());
        record.push(row.result.job_id.to_string());
        record.push(row.result.created_at.to_rfc3339());

        self.writer.write_record(&record)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), RowIoError> {
        self.writer.flush().map_err(RowIoError::Io)
    }
}

fn join_spatial_context(city: Option<&str>, province: Option<&str>) -> String {
    match (city, province) {
        (Some(city), Some(province)) => format!("{city}, {province}"),
        (Some(city), None) => city.to_string(),
        (None, Some(province)) => province.to_string(),
        (None, None) => String::new(),
    }
}

/// Writes the sidecar legend listing the closed category set, one row per
/// `CanonicalCategory`, so spreadsheet tooling can build its own
/// `confirmed_ethnicity` validation list against a known closed set.
pub fn write_category_legend(path: &Path) -> Result<(), RowIoError> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(["code", "display_name"])?;
    for category in CanonicalCategory::all() {
        writer.write_record([category.code(), category.display_name()])?;
    }
    writer.flush().map_err(RowIoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadscout_domain_models::LeadSourceFields;
    use uuid::Uuid;

    #[test]
    fn legend_contains_every_canonical_category() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("legend.csv");
        write_category_legend(&path).expect("legend should write");
        let contents = std::fs::read_to_string(&path).expect("legend should be readable");
        for category in CanonicalCategory::all() {
            assert!(contents.contains(category.display_name()));
        }
    }

    #[test]
    fn export_header_carries_original_columns_then_enrichment_columns() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("export.csv");
        let headers = StringRecord::from(vec!["entity_name", "director_name"]);
        let mut writer = ExportWriter::create(&path, &headers).expect("writer should create");

        let result = LeadResult::unclassified(Uuid::new_v4(), 0, LeadSourceFields { entity_name: "Acme".into(), director_name: "Thabo Mthembu".into(), registered_address: None, registered_city: None, registered_province: None });
        let original = StringRecord::from(vec!["Acme", "Thabo Mthembu"]);
        writer.write_row(ExportRow { original: &original, result: &result }).expect("row should write");
        writer.flush().expect("writer should flush");

        let contents = std::fs::read_to_string(&path).expect("export should be readable");
        assert!(contents.starts_with("entity_name,director_name,director_ethnicity"));
    }
}
