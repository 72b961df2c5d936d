// [libs/infra/rate-governor/src/lib.rs]
/*!
 * =================================================================
 * APARATO: RATE-LIMIT GOVERNOR (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: SELECCIÓN DE PROVEEDOR Y RETROCESO EXPONENCIAL PARA L4
 *
 * `acquire` never errors (spec §4.6): a provider grant, a wait duration, or
 * "every provider is permanently exhausted" -- the cascade decides what to
 * do with each outcome. Scheduling is single-process, cooperatively
 * interleaved across whatever classifications are in flight.
 * =================================================================
 */

pub mod bucket;
pub mod config;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{info, instrument};

use leadscout_domain_cascade::ports::{GovernorDecision, RateGovernor};
use leadscout_domain_models::ProviderId;

use bucket::ProviderState;
use config::ProviderGovernorConfig;

pub struct RateGovernorImpl {
    states: Mutex<HashMap<ProviderId, ProviderState>>,
}

impl RateGovernorImpl {
    pub fn new(configs: HashMap<ProviderId, ProviderGovernorConfig>) -> Self {
        let states = configs.into_iter().map(|(provider, config)| (provider, ProviderState::new(config))).collect();
        Self { states: Mutex::new(states) }
    }

    pub fn with_defaults(providers: &[ProviderId]) -> Self {
        let configs = providers.iter().map(|&provider| (provider, ProviderGovernorConfig::default())).collect();
        Self::new(configs)
    }
}

#[async_trait::async_trait]
impl RateGovernor for RateGovernorImpl {
    #[instrument(skip(self))]
    async fn acquire(&self, exclude: &[ProviderId]) -> GovernorDecision {
        let mut states = self.states.lock().await;
        let now = Instant::now();

        let mut shortest_wait: Option<Duration> = None;
        let mut any_live = false;

        for provider in ProviderId::all() {
            if exclude.contains(provider) {
                continue;
            }
            let Some(state) = states.get_mut(provider) else { continue };
            if state.is_exhausted() {
                continue;
            }
            any_live = true;

            match state.try_acquire(now) {
                Ok(()) => return GovernorDecision::Proceed(*provider),
                Err(wait) => {
                    shortest_wait = Some(shortest_wait.map_or(wait, |current: Duration| current.min(wait)));
                }
            }
        }

        if !any_live {
            return GovernorDecision::AllProvidersExhausted;
        }

        GovernorDecision::WaitFor(shortest_wait.unwrap_or(Duration::from_millis(50)))
    }

    async fn report_outcome(&self, provider: ProviderId, succeeded: bool) {
        let mut states = self.states.lock().await;
        let Some(state) = states.get_mut(&provider) else { return };

        if succeeded {
            state.report_success();
        } else {
            state.report_failure(Instant::now());
            if state.is_exhausted() {
                info!("provider {:?} marked permanently exhausted for this session", provider);
            }
        }
    }

    async fn mark_exhausted(&self, provider: ProviderId) {
        let mut states = self.states.lock().await;
        if let Some(state) = states.get_mut(&provider) {
            state.force_exhausted();
            info!("provider {:?} forced to permanently exhausted (quota exhausted)", provider);
        }
    }
}
