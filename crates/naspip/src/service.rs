use std::collections::HashMap;
use std::future::Future;

use tokio::sync::Mutex;

use crate::error::ServiceError;
use crate::types::payload::{
    Payment, PaymentInstructions, PaymentRequest, QrReadData, QrReadResponse, SignedPayload,
};

/// The backend that signs payment requests into NASPIP tokens and decodes
/// them again.
pub trait TokenService {
    /// Sign `request`, returning the opaque token.
    fn generate(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send;

    /// Decode a token previously issued by the backend.
    fn read(&self, token: &str) -> impl Future<Output = Result<QrReadResponse, ServiceError>> + Send;
}

/// In-memory token service. Tokens are not signed; they only index the
/// stored requests.
pub struct StaticTokenService {
    issuer: String,
    issued: Mutex<HashMap<String, QrReadResponse>>,
}

impl StaticTokenService {
    pub fn new(issuer: &str) -> Self {
        Self {
            issuer: issuer.to_string(),
            issued: Mutex::new(HashMap::new()),
        }
    }

    /// Register a fixed response under `token`.
    pub async fn insert(&self, token: &str, response: QrReadResponse) {
        self.issued.lock().await.insert(token.to_string(), response);
    }

    fn envelope(&self, request: &PaymentRequest) -> QrReadResponse {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        let expires_at = request.expires_at.unwrap_or(0);
        QrReadResponse {
            data: QrReadData {
                payload: SignedPayload {
                    payload: PaymentInstructions {
                        payment: Payment {
                            id: request.id.clone(),
                            address: request.address.clone(),
                            network_token: request.network_token.clone(),
                            is_open: request.is_open,
                            amount: request.amount.clone(),
                            expires_at,
                        },
                        order: None,
                    },
                    kid: "static".to_string(),
                    kis: self.issuer.clone(),
                    kep: String::new(),
                    iat: now.to_string(),
                    exp: expires_at.to_string(),
                    iss: self.issuer.clone(),
                },
                version: "1".to_string(),
                purpose: "payment".to_string(),
            },
        }
    }
}

impl Default for StaticTokenService {
    fn default() -> Self {
        Self::new("fluxis")
    }
}

impl TokenService for StaticTokenService {
    async fn generate(&self, request: &PaymentRequest) -> Result<String, ServiceError> {
        let mut issued = self.issued.lock().await;
        let token = format!("naspip;static;{};{}", issued.len() + 1, request.id);
        issued.insert(token.clone(), self.envelope(request));
        Ok(token)
    }

    async fn read(&self, token: &str) -> Result<QrReadResponse, ServiceError> {
        self.issued
            .lock()
            .await
            .get(token)
            .cloned()
            .ok_or(ServiceError::NotFound)
    }
}
