// [apps/leadscout-cli/src/main.rs]
/*!
 * =================================================================
 * APARATO: LEADSCOUT SHELL
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: BOOTSTRAP, SEÑALES DE CANCELACIÓN Y CÓDIGOS DE SALIDA
 *
 * ZERO ABBREVIATIONS en directivas de mando. Delega toda la ejecución al
 * motor (`leadscout_cli_lib::engine`); este archivo es un switchboard puro
 * de configuración, señales y mapeo de errores a códigos de proceso.
 * =================================================================
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use leadscout_cli_lib::config::{Command, CommandLineDirectives};
use leadscout_cli_lib::engine;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    leadscout_shared_telemetry::init_tracing("leadscout_cli");

    let directives = CommandLineDirectives::parse();

    let cancel_requested = Arc::new(AtomicBool::new(false));
    let signal_flag_reference = Arc::clone(&cancel_requested);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⚠️ interrupt received, finishing the in-flight batch before stopping");
            signal_flag_reference.store(true, Ordering::SeqCst);
        }
    });

    let exit_code = match directives.command {
        Command::Run(args) => match engine::run(&directives.store_path, &directives.holder_identifier, args, cancel_requested).await {
            Ok(outcome) => {
                info!("🏁 job {} finished as {:?}: {} processed, {} failed", outcome.job_id, outcome.status, outcome.processed_row_count, outcome.failed_row_count);
                0
            }
            Err(error) => {
                error!("run failed: {}", error);
                error.exit_code()
            }
        },
        Command::Export(args) => match engine::export_job(&directives.store_path, args).await {
            Ok(count) => {
                info!("📤 exported {} rows", count);
                0
            }
            Err(error) => {
                error!("export failed: {}", error);
                error.exit_code()
            }
        },
        Command::Ingest(args) => match engine::ingest_confirmations(&directives.store_path, args).await {
            Ok(count) => {
                info!("📥 applied {} confirmations", count);
                0
            }
            Err(error) => {
                error!("ingest failed: {}", error);
                error.exit_code()
            }
        },
    };

    std::process::exit(exit_code);
}
