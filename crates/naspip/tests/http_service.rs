#![cfg(feature = "http")]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::routing::post;
use axum::{Json, Router};
use naspip::error::{Error, ServiceError};
use naspip::{read_payment, HttpTokenService, Registry, TokenService};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Canned backend: answers every request with the same status and body and
/// records `(path, json body)` for each call.
#[derive(Clone)]
struct Backend {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Backend {
    fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            received: Arc::default(),
        }
    }

    fn received(&self) -> Vec<(String, Value)> {
        self.received.lock().unwrap().clone()
    }
}

async fn respond(
    State(backend): State<Backend>,
    uri: Uri,
    Json(body): Json<Value>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    backend
        .received
        .lock()
        .unwrap()
        .push((uri.path().to_string(), body));
    (
        backend.status,
        [(header::CONTENT_TYPE, "application/json")],
        backend.body.clone(),
    )
}

/// Serve `backend` on an ephemeral port and return its base url.
async fn spawn_backend(backend: Backend) -> String {
    let app = Router::new()
        .route("/v1/qr/generate", post(respond))
        .route("/v1/qr/read", post(respond))
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base_url
}

fn read_body() -> String {
    json!({
        "data": {
            "payload": {
                "payload": {
                    "payment": {
                        "id": "inv-99",
                        "address": "0x1234567890123456789012345678901234567890",
                        "network_token": "npolygon_t0x3c499c542cef5e3811e1192ce70d8cc03d5c3359",
                        "is_open": false,
                        "amount": "7.25",
                        "expires_at": 0
                    }
                },
                "kid": "k1", "kis": "fluxis", "kep": "https://keys.example/k1",
                "iat": "1767220000", "exp": "0", "iss": "https://shop.example"
            },
            "version": "1",
            "purpose": "payment"
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_generate_posts_payment_request() {
    let backend = Backend::new(StatusCode::OK, r#"{"token":"naspip;v1;abc"}"#);
    let service = HttpTokenService::new(spawn_backend(backend.clone()).await);

    let request = naspip::types::payload::PaymentRequest {
        id: "inv-1".to_string(),
        address: "0x1234567890123456789012345678901234567890".to_string(),
        network_token: "nerc20_t0xdAC17F958D2ee523a2206206994597C13D831ec7".to_string(),
        is_open: false,
        amount: "10".to_string(),
        expires_at: None,
    };
    let token = service.generate(&request).await.unwrap();
    assert_eq!(token, "naspip;v1;abc");

    let received = backend.received();
    assert_eq!(received.len(), 1);
    let (path, body) = &received[0];
    assert_eq!(path, "/v1/qr/generate");
    assert_eq!(
        body["network_token"],
        "nerc20_t0xdAC17F958D2ee523a2206206994597C13D831ec7"
    );
    assert!(body.get("expires_at").is_none());
}

#[tokio::test]
async fn test_read_payment_over_http() {
    let backend = Backend::new(StatusCode::OK, read_body());
    let service = HttpTokenService::new(spawn_backend(backend.clone()).await);
    let registry = Registry::builtin();

    let info = read_payment(&service, &registry, "naspip;v1;abc").await.unwrap();
    assert_eq!(info.id, "inv-99");
    assert_eq!(info.chain_id, Some(137));

    let received = backend.received();
    assert_eq!(
        received,
        vec![("/v1/qr/read".to_string(), json!({ "token": "naspip;v1;abc" }))]
    );
}

#[tokio::test]
async fn test_error_message_from_body() {
    let backend = Backend::new(
        StatusCode::BAD_REQUEST,
        r#"{"message":"token signature invalid"}"#,
    );
    let service = HttpTokenService::new(spawn_backend(backend).await);

    let err = service.read("naspip;v1;tampered").await.unwrap_err();
    match err {
        ServiceError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "token signature invalid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_body_uses_fallback() {
    let backend = Backend::new(StatusCode::INTERNAL_SERVER_ERROR, "");
    let service = HttpTokenService::new(spawn_backend(backend).await);
    let registry = Registry::builtin();

    let err = read_payment(&service, &registry, "naspip;v1;abc")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Service(ServiceError::Status { status: 500, ref message }) if message == "Failed to read QR token"
    ));
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let backend = Backend::new(StatusCode::OK, r#"{"unexpected":true}"#);
    let service = HttpTokenService::new(spawn_backend(backend).await);

    assert!(matches!(
        service.read("naspip;v1;abc").await,
        Err(ServiceError::Decode(_))
    ));
}
