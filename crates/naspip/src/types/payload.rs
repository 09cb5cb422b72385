//! Wire shapes exchanged with the backend token service.
//!
//! Only the current envelope is modelled: the decoded payment sits at
//! `data.payload.payload`, next to the token's signing claims.

use serde::{Deserialize, Serialize};

/// Response of `POST /v1/qr/read`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrReadResponse {
    pub data: QrReadData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrReadData {
    pub payload: SignedPayload,
    pub version: String,
    pub purpose: String,
}

/// Decoded token body plus the claims it was signed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedPayload {
    pub payload: PaymentInstructions,

    /// Key id.
    pub kid: String,
    /// Key issuer.
    pub kis: String,
    /// Key endpoint.
    pub kep: String,
    pub iat: String,
    pub exp: String,
    /// Issuer; usually the merchant's URL.
    pub iss: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInstructions {
    pub payment: Payment,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    /// Recipient address.
    pub address: String,
    /// Asset identifier, `n<network>_t<contract>`.
    pub network_token: String,
    pub is_open: bool,
    /// Decimal amount in token units, e.g. `"12.50"`.
    pub amount: String,
    /// Unix seconds; zero when the request never expires.
    #[serde(default)]
    pub expires_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub total_amount: String,
    pub coin_code: String,
    pub merchant: Merchant,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tax_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub description: String,
    pub amount: String,
    pub unit_price: String,
    pub quantity: u32,
    pub coin_code: String,
}

/// Body of `POST /v1/qr/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub id: String,
    pub address: String,
    pub network_token: String,
    pub is_open: bool,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

/// Response of `POST /v1/qr/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_response_parses_nested_payment() {
        let json = serde_json::json!({
            "data": {
                "payload": {
                    "payload": {
                        "payment": {
                            "id": "order-42",
                            "address": "0x1234567890123456789012345678901234567890",
                            "network_token": "npolygon_t0x3c499c542cef5e3811e1192ce70d8cc03d5c3359",
                            "is_open": false,
                            "amount": "12.50",
                            "expires_at": 1767225600
                        },
                        "order": {
                            "total_amount": "12.50",
                            "coin_code": "USDC",
                            "merchant": { "name": "Cafe", "description": "Coffee", "tax_id": "20-1" },
                            "items": [
                                { "description": "Latte", "amount": "12.50", "unit_price": "6.25", "quantity": 2, "coin_code": "USDC" }
                            ]
                        }
                    },
                    "kid": "k1", "kis": "https://keys.example", "kep": "https://keys.example/k1",
                    "iat": "1767220000", "exp": "1767225600", "iss": "https://shop.example"
                },
                "version": "1",
                "purpose": "payment"
            }
        });

        let resp: QrReadResponse = serde_json::from_value(json).unwrap();
        let body = &resp.data.payload.payload;
        assert_eq!(body.payment.id, "order-42");
        assert_eq!(body.payment.expires_at, 1767225600);
        let order = body.order.as_ref().unwrap();
        assert_eq!(order.merchant.name, "Cafe");
        assert_eq!(order.items[0].quantity, 2);
    }

    #[test]
    fn test_order_is_optional() {
        let json = serde_json::json!({
            "payment": {
                "id": "x",
                "address": "0xabc",
                "network_token": "nerc20_t0xabc",
                "is_open": true,
                "amount": "1"
            }
        });
        let body: PaymentInstructions = serde_json::from_value(json).unwrap();
        assert!(body.order.is_none());
        assert_eq!(body.payment.expires_at, 0);
    }
}
