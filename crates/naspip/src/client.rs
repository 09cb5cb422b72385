//! HTTP client for the backend token service.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;
use crate::error::ServiceError;
use crate::service::TokenService;
use crate::types::payload::{GenerateResponse, PaymentRequest, QrReadResponse};

const GENERATE_PATH: &str = "v1/qr/generate";
const READ_PATH: &str = "v1/qr/read";

/// Token service reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTokenService {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ReadRequest<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpTokenService {
    /// Create a client with reqwest's default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<B, T>(&self, path: &str, body: &B, fallback: &str) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "calling token service");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| fallback.to_string());
            tracing::warn!(%url, status = status.as_u16(), %message, "token service rejected request");
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

impl TokenService for HttpTokenService {
    async fn generate(&self, request: &PaymentRequest) -> Result<String, ServiceError> {
        let response: GenerateResponse = self
            .post(GENERATE_PATH, request, "Failed to generate QR token")
            .await?;
        Ok(response.token)
    }

    async fn read(&self, token: &str) -> Result<QrReadResponse, ServiceError> {
        self.post(READ_PATH, &ReadRequest { token }, "Failed to read QR token")
            .await
    }
}
