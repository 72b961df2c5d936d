// [libs/infra/rate-governor/src/bucket.rs]
/*!
 * APARATO: PER-PROVIDER TOKEN BUCKET AND BACKOFF STATE
 * RESPONSABILIDAD: CONTABILIDAD DE TASA, RETROCESO EXPONENCIAL Y AGOTAMIENTO DE CUOTA
 */

use std::time::{Duration, Instant};

use crate::config::ProviderGovernorConfig;

pub struct ProviderState {
    config: ProviderGovernorConfig,
    tokens: f64,
    capacity: f64,
    refill_per_second: f64,
    last_refill: Instant,
    backoff_until: Option<Instant>,
    consecutive_failures: u32,
    permanently_exhausted: bool,
}

impl ProviderState {
    pub fn new(config: ProviderGovernorConfig) -> Self {
        let capacity = config.requests_per_minute as f64;
        Self {
            config,
            tokens: capacity,
            capacity,
            refill_per_second: capacity / 60.0,
            last_refill: Instant::now(),
            backoff_until: None,
            consecutive_failures: 0,
            permanently_exhausted: false,
        }
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_per_second).min(self.capacity);
        self.last_refill = now;
    }

    pub fn is_exhausted(&self) -> bool {
        self.permanently_exhausted
    }

    /// Marks the provider unusable for the rest of the session immediately,
    /// independent of the gradual consecutive-failure escalation in
    /// `report_failure` (spec §4.5: a quota-exhausted response is terminal
    /// for the session the moment it happens).
    pub fn force_exhausted(&mut self) {
        self.permanently_exhausted = true;
    }

    /// Returns `Ok(())` if a token was taken (the caller may proceed), or
    /// `Err(wait_duration)` otherwise. Never errors for a reason other than
    /// "try again after this long" -- permanent exhaustion is surfaced via
    /// `is_exhausted`, checked by the caller first.
    pub fn try_acquire(&mut self, now: Instant) -> Result<(), Duration> {
        if let Some(until) = self.backoff_until {
            if now < until {
                return Err(until - now);
            }
        }

        self.refill(now);

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            Ok(())
        } else {
            let deficit = 1.0 - self.tokens;
            Err(Duration::from_secs_f64(deficit / self.refill_per_second.max(f64::MIN_POSITIVE)))
        }
    }

    pub fn report_success(&mut self) {
        self.consecutive_failures = 0;
        self.backoff_until = None;
    }

    pub fn report_failure(&mut self, now: Instant) {
        self.consecutive_failures += 1;
        let scaled = self.config.initial_backoff.as_secs_f64() * self.config.backoff_multiplier.powi(self.consecutive_failures as i32 - 1);
        let capped = scaled.min(self.config.max_backoff.as_secs_f64());
        self.backoff_until = Some(now + Duration::from_secs_f64(capped));

        if self.consecutive_failures >= self.config.quota_exhausted_after_failures {
            self.permanently_exhausted = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_bucket_grants_immediately() {
        let mut state = ProviderState::new(ProviderGovernorConfig::default());
        assert!(state.try_acquire(Instant::now()).is_ok());
    }

    #[test]
    fn exhausted_bucket_reports_a_wait_duration() {
        let config = ProviderGovernorConfig { requests_per_minute: 1, ..ProviderGovernorConfig::default() };
        let mut state = ProviderState::new(config);
        let now = Instant::now();
        assert!(state.try_acquire(now).is_ok());
        assert!(state.try_acquire(now).is_err());
    }

    #[test]
    fn repeated_failures_escalate_to_permanent_exhaustion() {
        let config = ProviderGovernorConfig { quota_exhausted_after_failures: 2, initial_backoff: Duration::from_millis(1), max_backoff: Duration::from_millis(5), ..ProviderGovernorConfig::default() };
        let mut state = ProviderState::new(config);
        let now = Instant::now();
        state.report_failure(now);
        assert!(!state.is_exhausted());
        state.report_failure(now);
        assert!(state.is_exhausted());
    }
}
