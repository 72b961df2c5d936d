// [apps/leadscout-cli/src/config.rs]
/*!
 * =================================================================
 * APARATO: COMMAND DIRECTIVES (V1.0)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: CONFIGURACIÓN CERRADA VÍA CLI, ENTORNO Y .env
 *
 * One explicit record per §6's enumerated option list; clap rejects any
 * flag outside this closed set at parse time, so there is no runtime
 * string-keyed option bag anywhere in the hot path.
 * =================================================================
 */

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

#[derive(Parser, Debug, Deserialize)]
#[command(
    author = "Raz Podesta <metaShark Tech>",
    version = "1.0",
    about = "LeadScout: cascada L0-L4 de clasificación demográfica por lotes con reanudación conservadora"
)]
pub struct CommandLineDirectives {
    /// Ruta del archivo embebido de persistencia (única fuente de verdad).
    #[arg(long, env = "LEADSCOUT_STORE_PATH", default_value = "leadscout.db")]
    pub store_path: String,

    /// Identificador del proceso que sostiene el candado del job (para diagnóstico multi-host).
    #[arg(long, env = "LEADSCOUT_HOLDER_IDENTIFIER", default_value = "leadscout-cli")]
    pub holder_identifier: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Deserialize)]
pub enum Command {
    /// Clasifica (o reanuda) un job de lotes contra un origen CSV.
    Run(RunArgs),
    /// Exporta los LeadResults de un job ya completado a un CSV enriquecido.
    Export(ExportArgs),
    /// Ingiere un CSV exportado con veredictos humanos y los aplica al store.
    Ingest(IngestArgs),
}

#[derive(Args, Debug, Deserialize)]
pub struct RunArgs {
    /// Archivo CSV de origen, direccionable por fila.
    #[arg(long)]
    pub source_path: PathBuf,

    /// Tamaño de lote (entero positivo).
    #[arg(long, env = "LEADSCOUT_BATCH_SIZE", default_value_t = 100)]
    pub batch_size: u32,

    /// Clasificaciones concurrentes máximas dentro de un lote.
    #[arg(long, env = "LEADSCOUT_MAX_CONCURRENT", default_value_t = 8)]
    pub max_concurrent: usize,

    /// Presupuesto monetario máximo de L4 para la sesión completa.
    #[arg(long, env = "LEADSCOUT_MAX_LLM_COST_PER_SESSION", default_value_t = 10.0)]
    pub max_llm_cost_per_session: f64,

    /// Tope de solicitudes por minuto para el proveedor A.
    #[arg(long, env = "LEADSCOUT_PROVIDER_A_RPM", default_value_t = 30)]
    pub provider_a_rpm: u32,

    /// Tope de solicitudes por minuto para el proveedor B.
    #[arg(long, env = "LEADSCOUT_PROVIDER_B_RPM", default_value_t = 30)]
    pub provider_b_rpm: u32,

    /// Retroceso inicial (segundos) tras un fallo de proveedor.
    #[arg(long, env = "LEADSCOUT_INITIAL_BACKOFF_SECONDS", default_value_t = 2)]
    pub initial_backoff_seconds: u64,

    /// Retroceso máximo (segundos) antes de dar por agotado al proveedor.
    #[arg(long, env = "LEADSCOUT_MAX_BACKOFF_SECONDS", default_value_t = 120)]
    pub max_backoff_seconds: u64,

    /// Multiplicador exponencial del retroceso.
    #[arg(long, env = "LEADSCOUT_BACKOFF_MULTIPLIER", default_value_t = 2.0)]
    pub backoff_multiplier: f64,

    /// Tiempo de espera por solicitud a un proveedor (segundos).
    #[arg(long, env = "LEADSCOUT_PER_REQUEST_TIMEOUT_SECONDS", default_value_t = 20)]
    pub per_request_timeout_seconds: u64,

    /// Umbral mínimo de similitud fonética para el consenso L2.
    #[arg(long, env = "LEADSCOUT_PHONETIC_SIMILARITY_THRESHOLD", default_value_t = 0.85)]
    pub phonetic_similarity_threshold: f64,

    /// Confianza mínima para aceptar un patrón aprendido en L3.
    #[arg(long, env = "LEADSCOUT_LEARNED_PATTERN_MIN_CONFIDENCE", default_value_t = 0.6)]
    pub learned_pattern_min_confidence: f64,

    /// Credencial del proveedor A. Su ausencia deshabilita ese proveedor sin deshabilitar L4 por completo.
    #[arg(long, env = "LEADSCOUT_PROVIDER_A_API_KEY")]
    pub provider_a_api_key: Option<String>,

    /// URL base del proveedor A.
    #[arg(long, env = "LEADSCOUT_PROVIDER_A_BASE_URL")]
    pub provider_a_base_url: Option<String>,

    /// Precio por cada 1000 tokens del proveedor A.
    #[arg(long, env = "LEADSCOUT_PROVIDER_A_PRICE_PER_1K_TOKENS", default_value_t = 0.002)]
    pub provider_a_price_per_1k_tokens: f64,

    /// Credencial del proveedor B.
    #[arg(long, env = "LEADSCOUT_PROVIDER_B_API_KEY")]
    pub provider_b_api_key: Option<String>,

    /// URL base del proveedor B.
    #[arg(long, env = "LEADSCOUT_PROVIDER_B_BASE_URL")]
    pub provider_b_base_url: Option<String>,

    /// Precio por cada 1000 tokens del proveedor B.
    #[arg(long, env = "LEADSCOUT_PROVIDER_B_PRICE_PER_1K_TOKENS", default_value_t = 0.0025)]
    pub provider_b_price_per_1k_tokens: f64,
}

#[derive(Args, Debug, Deserialize)]
pub struct ExportArgs {
    /// Identificador del job cuyo resultado se exporta.
    #[arg(long)]
    pub job_id: uuid::Uuid,

    /// Archivo CSV de origen, necesario para reconstruir las columnas originales verbatim.
    #[arg(long)]
    pub source_path: PathBuf,

    /// Ruta del CSV enriquecido de salida.
    #[arg(long)]
    pub output_path: PathBuf,

    /// Ruta del CSV sidecar con la leyenda de categorías.
    #[arg(long)]
    pub legend_path: Option<PathBuf>,
}

#[derive(Args, Debug, Deserialize)]
pub struct IngestArgs {
    /// CSV previamente exportado y completado por un revisor humano.
    #[arg(long)]
    pub export_path: PathBuf,

    /// Archivo CSV de origen, para recomputar la huella de contenido.
    #[arg(long)]
    pub source_path: PathBuf,

    /// Identidad de quien confirma (para auditoría).
    #[arg(long, env = "LEADSCOUT_CONFIRMER_IDENTITY", default_value = "unknown-reviewer")]
    pub confirmer_identity: String,
}
