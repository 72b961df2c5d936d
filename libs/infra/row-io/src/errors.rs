// [libs/infra/row-io/src/errors.rs]
/*!
 * APARATO: ROW I/O ERROR CATALOG
 * RESPONSABILIDAD: FALLOS DE LECTURA, ESCRITURA E INGESTA TABULAR
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RowIoError {
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv failure: {0}")]
    Csv(#[from] csv::Error),

    #[error("row index {0} is beyond the end of the source")]
    RowOutOfRange(u64),

    #[error("required field missing or invalid: {0}")]
    LeadValidation(String),
}
