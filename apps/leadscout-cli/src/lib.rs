// [apps/leadscout-cli/src/lib.rs]
/*!
 * APARATO: LEADSCOUT CLI LIBRARY
 * RESPONSABILIDAD: EXPONER CONFIGURACIÓN Y MOTOR PARA EL BINARIO Y LAS PRUEBAS
 */

pub mod config;
pub mod engine;
pub mod errors;

pub use config::{Command, CommandLineDirectives, ExportArgs, IngestArgs, RunArgs};
pub use errors::EngineError;
