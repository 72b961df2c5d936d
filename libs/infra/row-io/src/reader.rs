// [libs/infra/row-io/src/reader.rs]
/*!
 * =================================================================
 * APARATO: STREAMING ROW READER (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: LECTURA POR RÁFAGAS, REANUDABLE DESDE CUALQUIER FILA
 *
 * `SourceIndex` makes restart from row S skip-and-take rather than
 * re-read-and-discard: one pass over the file on first open records each
 * row's `csv::Position`, so a resumed job seeks straight to row S's byte
 * offset instead of re-reading rows `0..S` (spec §4.9).
 * =================================================================
 */

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use csv::{Position, ReaderBuilder, StringRecord};
use tracing::{info, instrument};

use leadscout_domain_models::{LeadSourceFields, SourceFingerprint};

use crate::errors::RowIoError;

/// One source-row's parsed lead fields, its original columns (kept verbatim
/// for export passthrough), and its absolute row index.
#[derive(Debug, Clone)]
pub struct ParsedLeadRow {
    pub source_row_index: u64,
    pub fields: LeadSourceFields,
    pub original: StringRecord,
    /// Set when a required field (director name, per spec §6) is missing;
    /// the row is still returned so the engine can record a failed
    /// `LeadResult` rather than abort the batch.
    pub validation_error: Option<String>,
}

pub struct RowBatch {
    pub start_row_index: u64,
    pub rows: Vec<ParsedLeadRow>,
}

/// A row-index-to-byte-offset index built once per source file.
pub struct SourceIndex {
    headers: StringRecord,
    row_positions: Vec<Position>,
}

impl SourceIndex {
    #[instrument]
    pub fn build(path: &Path) -> Result<Self, RowIoError> {
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
        let headers = reader.headers()?.clone();

        let mut row_positions = Vec::new();
        let mut record = StringRecord::new();
        loop {
            let position = reader.position().clone();
            if !reader.read_record(&mut record)? {
                break;
            }
            row_positions.push(position);
        }

        info!("indexed {} rows at '{}'", row_positions.len(), path.display());
        Ok(Self { headers, row_positions })
    }

    pub fn total_row_count(&self) -> u64 {
        self.row_positions.len() as u64
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    fn position_for(&self, row_index: u64) -> Option<&Position> {
        self.row_positions.get(row_index as usize)
    }
}

/// Content fingerprint used to detect source drift across a resumed job
/// (spec §4.10, `SourceChanged`).
pub fn fingerprint(path: &Path) -> Result<SourceFingerprint, RowIoError> {
    let metadata = std::fs::metadata(path)?;
    let modified_at_unix_seconds = metadata
        .modified()?
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_secs() as i64)
        .unwrap_or(0);
    Ok(SourceFingerprint { file_size_bytes: metadata.len(), modified_at_unix_seconds })
}

pub struct StreamingRowReader<R> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    batch_size: u32,
    next_row_index: u64,
    total_row_count: u64,
}

impl StreamingRowReader<File> {
    /// Opens `path` positioned at `start_row_index` using a pre-built
    /// `SourceIndex`. Never reads rows `0..start_row_index`.
    pub fn open(path: &Path, index: &SourceIndex, batch_size: u32, start_row_index: u64) -> Result<Self, RowIoError> {
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

        if start_row_index > 0 {
            let position = index.position_for(start_row_index).ok_or(RowIoError::RowOutOfRange(start_row_index))?;
            reader.seek(position.clone())?;
        }

        Ok(Self { reader, headers: index.headers().clone(), batch_size, next_row_index: start_row_index, total_row_count: index.total_row_count() })
    }
}

impl<R: Read + Seek> StreamingRowReader<R> {
    /// Produces the next batch in source order, or `None` once the source
    /// is exhausted. The final batch may be shorter than `batch_size`.
    pub fn next_batch(&mut self) -> Result<Option<RowBatch>, RowIoError> {
        if self.next_row_index >= self.total_row_count {
            return Ok(None);
        }

        let start_row_index = self.next_row_index;
        let mut rows = Vec::with_capacity(self.batch_size as usize);
        let mut record = StringRecord::new();

        while rows.len() < self.batch_size as usize && self.reader.read_record(&mut record)? {
            let fields = map_record_to_fields(&self.headers, &record);
            let validation_error = if fields.director_name.trim().is_empty() { Some("director name is required".to_string()) } else { None };

            rows.push(ParsedLeadRow { source_row_index: self.next_row_index, fields, original: record.clone(), validation_error });
            self.next_row_index += 1;
        }

        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(RowBatch { start_row_index, rows }))
        }
    }
}

fn map_record_to_fields(headers: &StringRecord, record: &StringRecord) -> LeadSourceFields {
    let column = |name: &str| -> Option<String> {
        headers.iter().position(|header| header.eq_ignore_ascii_case(name)).and_then(|index| record.get(index)).map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
    };

    LeadSourceFields {
        entity_name: column("entity_name").unwrap_or_default(),
        director_name: column("director_name").unwrap_or_default(),
        registered_address: column("registered_address"),
        registered_city: column("registered_city"),
        registered_province: column("registered_province"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should create");
        write!(file, "{}", contents).expect("fixture should write");
        file
    }

    #[test]
    fn empty_source_has_zero_rows() {
        let file = write_fixture("entity_name,director_name,registered_address,registered_city,registered_province\n");
        let index = SourceIndex::build(file.path()).expect("index should build");
        assert_eq!(index.total_row_count(), 0);
    }

    #[test]
    fn restart_from_a_row_skips_earlier_rows() {
        let file = write_fixture(
            "entity_name,director_name,registered_address,registered_city,registered_province\n\
             Acme,Thabo Mthembu,,,\n\
             Zenith,Lucky Mabena,,,\n\
             Umbra,Sizwe Dlamini,,,\n",
        );
        let index = SourceIndex::build(file.path()).expect("index should build");
        assert_eq!(index.total_row_count(), 3);

        let mut reader = StreamingRowReader::open(file.path(), &index, 10, 1).expect("reader should open");
        let batch = reader.next_batch().expect("batch should read").expect("batch should be present");
        assert_eq!(batch.start_row_index, 1);
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.rows[0].fields.director_name, "Lucky Mabena");
    }

    #[test]
    fn final_short_batch_is_returned_in_full() {
        let file = write_fixture(
            "entity_name,director_name,registered_address,registered_city,registered_province\n\
             Acme,Thabo Mthembu,,,\n\
             Zenith,Lucky Mabena,,,\n\
             Umbra,Sizwe Dlamini,,,\n",
        );
        let index = SourceIndex::build(file.path()).expect("index should build");
        let mut reader = StreamingRowReader::open(file.path(), &index, 2, 0).expect("reader should open");

        let first = reader.next_batch().expect("batch should read").expect("batch should be present");
        assert_eq!(first.rows.len(), 2);
        let second = reader.next_batch().expect("batch should read").expect("batch should be present");
        assert_eq!(second.rows.len(), 1);
        assert!(reader.next_batch().expect("final read should succeed").is_none());
    }

    #[test]
    fn missing_director_name_is_flagged_not_fatal() {
        let file = write_fixture("entity_name,director_name,registered_address,registered_city,registered_province\nAcme,,,,\n");
        let index = SourceIndex::build(file.path()).expect("index should build");
        let mut reader = StreamingRowReader::open(file.path(), &index, 10, 0).expect("reader should open");
        let batch = reader.next_batch().expect("batch should read").expect("batch should be present");
        assert!(batch.rows[0].validation_error.is_some());
    }
}
