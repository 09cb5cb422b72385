//! Payment-side view of NASPIP tokens: what a scanned token asks for, whether
//! the connected wallet can pay it, and how a charge becomes a token request.

use num_bigint::BigUint;
use serde::Serialize;
use time::OffsetDateTime;

use crate::amount;
use crate::asset_id::AssetIdentifier;
use crate::error::{AmountError, AssetError, Error};
use crate::registry::Registry;
use crate::token::TokenMeta;
use crate::types::payload::{Order, PaymentRequest, QrReadResponse};
use crate::types::token::TokenSymbol;

/// Prefix carried by every NASPIP token.
pub const NASPIP_PREFIX: &str = "naspip";

/// Longest charge identifier kept; longer input is cut.
pub const MAX_CHARGE_ID_LEN: usize = 128;

/// Cheap check for pasted or scanned text before asking the backend.
pub fn is_naspip_token(text: &str) -> bool {
    text.trim().starts_with(NASPIP_PREFIX)
}

/// Payment details pulled out of a decoded token.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInfo {
    pub id: String,
    pub recipient: String,
    /// Decimal amount in token units.
    pub amount: String,
    pub is_open: bool,
    pub expires_at: i64,
    pub asset: AssetIdentifier,
    /// `None` when the token names a network we don't support.
    pub chain_id: Option<u64>,
    pub network_name: Option<String>,
    /// `None` when the contract is not a configured token.
    pub token: Option<TokenMeta>,
    pub order: Option<Order>,
    pub issuer: String,
}

impl PaymentInfo {
    /// Extract payment details, resolving the embedded asset identifier.
    ///
    /// A malformed `network_token` is an error: the token is corrupt or from
    /// an incompatible issuer and must not be paid. An unknown network is not.
    pub fn from_response(response: &QrReadResponse, registry: &Registry) -> Result<Self, AssetError> {
        let signed = &response.data.payload;
        let payment = &signed.payload.payment;

        let asset = AssetIdentifier::parse(&payment.network_token).inspect_err(|_| {
            tracing::warn!(
                payment_id = %payment.id,
                network_token = %payment.network_token,
                "malformed asset identifier in payment token"
            );
        })?;

        let resolved = registry.resolve_asset(&asset);
        if resolved.is_none() {
            tracing::debug!(network = asset.short_name(), "payment requires an unsupported network");
        }

        Ok(Self {
            id: payment.id.clone(),
            recipient: payment.address.clone(),
            amount: payment.amount.clone(),
            is_open: payment.is_open,
            expires_at: payment.expires_at,
            chain_id: resolved.as_ref().map(|r| r.chain_id),
            network_name: resolved.as_ref().map(|r| r.network.display_name.clone()),
            token: resolved.and_then(|r| r.token),
            asset,
            order: signed.payload.order.clone(),
            issuer: signed.iss.clone(),
        })
    }

    pub fn network_status(&self, connected: Option<u64>) -> NetworkStatus {
        NetworkStatus::reconcile(connected, self.chain_id)
    }

    /// A zero `expires_at` never expires.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at != 0 && now.unix_timestamp() >= self.expires_at
    }

    pub fn is_expired_now(&self) -> bool {
        self.is_expired(OffsetDateTime::now_utc())
    }

    /// Expiry as `YYYY-MM-DD HH:MM:SS UTC`.
    pub fn expires_at_display(&self) -> Option<String> {
        if self.expires_at == 0 {
            return None;
        }
        let format = time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
        );
        OffsetDateTime::from_unix_timestamp(self.expires_at)
            .ok()?
            .format(&format)
            .ok()
    }

    /// The issuer claim, if it is a link worth showing as one.
    pub fn issuer_url(&self) -> Option<&str> {
        let iss = self.issuer.as_str();
        let rest = iss
            .strip_prefix("https://")
            .or_else(|| iss.strip_prefix("http://"))?;
        (!rest.is_empty()).then_some(iss)
    }

    /// What the wallet needs to execute this payment.
    pub fn transfer_intent(&self) -> Result<TransferIntent, Error> {
        let chain_id = self.chain_id.ok_or_else(|| {
            Error::Payment(format!("network {:?} is not supported", self.asset.short_name()))
        })?;
        let token = self.token.as_ref().ok_or_else(|| {
            Error::Payment(format!(
                "token {} is not supported on chain {chain_id}",
                self.asset.contract_address()
            ))
        })?;

        Ok(TransferIntent {
            chain_id,
            symbol: token.symbol,
            token_address: self.asset.contract_address().to_string(),
            recipient: self.recipient.clone(),
            amount: amount::parse_units(&self.amount, token.decimals)?,
            decimals: token.decimals,
        })
    }
}

/// An ERC-20 transfer ready to hand to the wallet layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferIntent {
    pub chain_id: u64,
    pub symbol: TokenSymbol,
    pub token_address: String,
    pub recipient: String,
    /// Amount in the token's base units.
    #[serde(serialize_with = "serialize_decimal")]
    pub amount: BigUint,
    pub decimals: u8,
}

impl TransferIntent {
    /// The amount back in whole tokens, as the wallet will show it.
    pub fn display_amount(&self) -> String {
        amount::format_units(&self.amount, self.decimals)
    }
}

fn serialize_decimal<S: serde::Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Connected chain versus the chain a payment requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Ready,
    Mismatch { required: u64, connected: u64 },
    Disconnected,
    /// The payment names a network outside the registry.
    UnknownRequirement,
}

impl NetworkStatus {
    pub fn reconcile(connected: Option<u64>, required: Option<u64>) -> Self {
        match (connected, required) {
            (_, None) => NetworkStatus::UnknownRequirement,
            (None, Some(_)) => NetworkStatus::Disconnected,
            (Some(connected), Some(required)) if connected == required => NetworkStatus::Ready,
            (Some(connected), Some(required)) => NetworkStatus::Mismatch {
                required,
                connected,
            },
        }
    }

    /// Chain to switch to, when a switch would help.
    pub fn switch_target(&self) -> Option<u64> {
        match self {
            NetworkStatus::Mismatch { required, .. } => Some(*required),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, NetworkStatus::Ready)
    }
}

/// A payment request being created from the charge form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub id: String,
    pub symbol: TokenSymbol,
    pub amount: String,
    pub expires_at: Option<i64>,
}

impl ChargeRequest {
    pub fn new(id: &str, symbol: TokenSymbol, amount: &str) -> Result<Self, AmountError> {
        amount::validate_charge_amount(amount)?;
        Ok(Self {
            id: id.chars().take(MAX_CHARGE_ID_LEN).collect(),
            symbol,
            amount: amount.to_string(),
            expires_at: None,
        })
    }

    pub fn expiring_at(mut self, unix_seconds: i64) -> Self {
        self.expires_at = Some(unix_seconds);
        self
    }

    /// Body for the token service, paying `recipient` on `chain_id`.
    pub fn to_payment_request(
        &self,
        registry: &Registry,
        chain_id: u64,
        recipient: &str,
    ) -> Result<PaymentRequest, AssetError> {
        let asset = registry.build_asset_id(self.symbol, chain_id)?;
        Ok(PaymentRequest {
            id: self.id.clone(),
            address: recipient.to_string(),
            network_token: asset.to_string(),
            is_open: false,
            amount: self.amount.clone(),
            expires_at: self.expires_at,
        })
    }
}
