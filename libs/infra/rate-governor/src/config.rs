// [libs/infra/rate-governor/src/config.rs]
/*!
 * APARATO: GOVERNOR CONFIGURATION
 * RESPONSABILIDAD: PARÁMETROS POR PROVEEDOR DEL CUBO DE TOKENS Y BACKOFF
 */

use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ProviderGovernorConfig {
    pub requests_per_minute: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
    /// Consecutive failures after which the provider is treated as
    /// permanently exhausted for the remainder of the session (spec §4.6's
    /// quota-exhausted escalation, modeled without a dedicated signal since
    /// `report_outcome` only carries a success/failure bool).
    pub quota_exhausted_after_failures: u32,
}

impl Default for ProviderGovernorConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 30,
            initial_backoff: Duration::from_secs(2),
            max_backoff: Duration::from_secs(120),
            backoff_multiplier: 2.0,
            quota_exhausted_after_failures: 6,
        }
    }
}
