// [libs/infra/llm-provider/src/client.rs]
/*!
 * =================================================================
 * APARATO: LLM PROVIDER CLIENT (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: NEGOCIACIÓN HTTP CON PROVEEDORES DE CLASIFICACIÓN
 *
 * Two named providers (spec §4.5), each with its own base URL, credential,
 * and per-1k-token price. Absence of a credential disables that provider
 * without disabling the other (spec §6: "absence of both disables L4").
 * =================================================================
 */

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{instrument, warn};

use leadscout_domain_models::ProviderId;

use crate::errors::ProviderError;
use crate::schema::{parse_response, ClassificationRequest, ClassificationResponseEnvelope, ParsedClassification};

#[derive(Debug, Clone)]
pub struct ProviderCredential {
    pub base_url: String,
    pub api_key: String,
    pub price_per_1k_tokens: f64,
}

pub struct LlmProviderClient {
    http: Client,
    credentials: HashMap<ProviderId, ProviderCredential>,
}

impl LlmProviderClient {
    pub fn new(credentials: HashMap<ProviderId, ProviderCredential>, per_request_timeout: Duration) -> Self {
        let http = Client::builder().timeout(per_request_timeout).user_agent("leadscout-cli/1.0").build().expect("reqwest client configuration should be valid");
        Self { http, credentials }
    }

    pub fn has_credential(&self, provider: ProviderId) -> bool {
        self.credentials.contains_key(&provider)
    }

    #[instrument(skip(self))]
    pub async fn classify(&self, provider: ProviderId, probe_name: &str) -> Result<(ParsedClassification, f64), ProviderError> {
        let credential = self.credentials.get(&provider).ok_or(ProviderError::MissingCredential)?;

        let request = ClassificationRequest::new(probe_name);
        let endpoint = format!("{}/v1/classify", credential.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&credential.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        match response.status() {
            StatusCode::OK => {
                let envelope = response.json::<ClassificationResponseEnvelope>().await.map_err(|error| ProviderError::MalformedResponse(error.to_string()))?;
                let parsed = parse_response(envelope)?;
                let cost = (parsed.usage.prompt_tokens + parsed.usage.completion_tokens) as f64 * credential.price_per_1k_tokens / 1_000.0;
                Ok((parsed, cost))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited),
            StatusCode::PAYMENT_REQUIRED | StatusCode::FORBIDDEN => Err(ProviderError::QuotaExhausted),
            status if status.is_server_error() => Err(ProviderError::Transient(format!("HTTP {status}"))),
            status => {
                warn!("provider {:?} returned unexpected status {}", provider, status);
                Err(ProviderError::Transient(format!("HTTP {status}")))
            }
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() || error.is_connect() {
        ProviderError::Transient(error.to_string())
    } else {
        ProviderError::Transient(error.to_string())
    }
}
