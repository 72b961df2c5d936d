// [libs/domain/cascade/src/errors.rs]
use thiserror::Error;

/// Failure taxonomy for an L4 attempt (spec §7). Kept as distinct variants,
/// not a single opaque string, so `CascadeExecutor` can apply the right
/// policy per kind: retry in place, fail over to the other provider, or give
/// up and record the lead failed.
#[derive(Debug, Error)]
pub enum CascadeError {
    #[error("L4 budget exhausted: max_llm_cost_per_session would be exceeded")]
    BudgetExhausted,

    #[error("both providers unavailable: {0}")]
    AllProvidersUnavailable(String),

    #[error("cascade probe cancelled")]
    Cancelled,

    /// Network, 5xx-equivalent, parse-retry-eligible. Retried with backoff
    /// on the same provider up to a configured count before failing over.
    #[error("transient provider failure: {0}")]
    Transient(String),

    /// Provider signaled throttling; reported to the governor, which the
    /// caller awaits on before retrying.
    #[error("provider rate-limited the request")]
    RateLimited,

    /// Provider signaled a hard quota; the provider is unusable for the
    /// rest of the session and the caller must fail over.
    #[error("provider quota exhausted")]
    QuotaExhausted,

    /// Structured-output contract violated; non-retryable on the same
    /// provider, failover attempted.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("no credential configured for provider")]
    MissingCredential,
}
