// [libs/infra/llm-provider/src/errors.rs]
/*!
 * APARATO: PROVIDER ERROR CATALOG
 * RESPONSABILIDAD: TAXONOMÍA SEMÁNTICA DE FALLOS DE CLASIFICACIÓN EXTERNA
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network, 5xx-equivalent, parse-retry-eligible.
    #[error("transient provider failure: {0}")]
    Transient(String),

    /// Provider signaled throttling; the caller must back off.
    #[error("provider rate-limited the request")]
    RateLimited,

    /// Provider signaled a hard quota; the provider is unusable for the session.
    #[error("provider quota exhausted")]
    QuotaExhausted,

    /// Structured-output contract violated; non-retryable on the same provider.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// No credential configured for this provider.
    #[error("no credential configured for provider")]
    MissingCredential,
}
