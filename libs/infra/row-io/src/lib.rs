// [libs/infra/row-io/src/lib.rs]
/*!
 * =================================================================
 * CRATE: leadscout-infra-rowio
 * RESPONSABILIDAD: MEDIO TABULAR CSV (LECTURA, ESCRITURA, INGESTA)
 *
 * The source/sink is treated as an opaque tabular medium, per spec §1:
 * this crate owns every byte that crosses that boundary and nothing else
 * in the workspace touches `csv` directly.
 * =================================================================
 */

mod errors;
mod ingest;
mod reader;
mod writer;

pub use errors::RowIoError;
pub use ingest::{ingest_confirmed_rows, IngestedConfirmation};
pub use reader::{fingerprint, ParsedLeadRow, RowBatch, SourceIndex, StreamingRowReader};
pub use writer::{write_category_legend, ExportRow, ExportWriter};
