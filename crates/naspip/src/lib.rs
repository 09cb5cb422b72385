pub mod amount;
pub mod asset_id;
#[cfg(feature = "http")]
pub mod client;
pub mod config;
pub mod error;
pub mod payment;
pub mod registry;
pub mod service;
pub mod token;
pub mod types;
pub mod wallet;

use error::{Error, ServiceError};

// Re-exports for convenience
pub use asset_id::AssetIdentifier;
#[cfg(feature = "http")]
pub use client::HttpTokenService;
pub use config::Config;
pub use payment::{ChargeRequest, NetworkStatus, PaymentInfo, TransferIntent};
pub use registry::{Registry, ResolvedAsset};
pub use service::{StaticTokenService, TokenService};
pub use token::{TokenMeta, TokenSource};
pub use types::network::NetworkDescriptor;
pub use types::token::{TokenDescriptor, TokenSymbol};
pub use wallet::{ensure_network, WalletConnection};

/// Turn a charge into a NASPIP token payable on `chain_id` to `recipient`.
///
/// Fails before contacting the backend when the token is not deployed on
/// that chain.
pub async fn create_charge<S: TokenService>(
    service: &S,
    registry: &Registry,
    charge: &ChargeRequest,
    chain_id: u64,
    recipient: &str,
) -> Result<String, Error> {
    let request = charge.to_payment_request(registry, chain_id, recipient)?;
    tracing::debug!(
        charge_id = %request.id,
        network_token = %request.network_token,
        "generating payment token"
    );
    Ok(service.generate(&request).await?)
}

/// Decode a scanned or pasted token into payment details.
///
/// Text without the `naspip` prefix is rejected without a backend call.
pub async fn read_payment<S: TokenService>(
    service: &S,
    registry: &Registry,
    token: &str,
) -> Result<PaymentInfo, Error> {
    let token = token.trim();
    if !payment::is_naspip_token(token) {
        return Err(ServiceError::NotNaspip.into());
    }
    let response = service.read(token).await?;
    Ok(PaymentInfo::from_response(&response, registry)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssetError;
    use crate::payment::tests::read_response;
    use crate::wallet::tests::MockWallet;

    #[tokio::test]
    async fn test_charge_then_pay_round_trip() {
        let registry = Registry::builtin();
        let service = StaticTokenService::new("https://shop.example");

        let charge = ChargeRequest::new("table-4", TokenSymbol::Usdt, "25.40").unwrap();
        let token = create_charge(
            &service,
            &registry,
            &charge,
            56,
            "0x1234567890123456789012345678901234567890",
        )
        .await
        .unwrap();

        let info = read_payment(&service, &registry, &token).await.unwrap();
        assert_eq!(info.id, "table-4");
        assert_eq!(info.chain_id, Some(56));
        assert_eq!(info.amount, "25.40");

        let wallet = MockWallet::on(1);
        let status = ensure_network(&wallet, &info).await.unwrap();
        assert!(status.is_ready());
        assert_eq!(wallet.switches(), 1);

        let intent = info.transfer_intent().unwrap();
        assert_eq!(intent.token_address, "0x55d398326f99059fF775485246999027B3197955");
        assert_eq!(intent.display_amount(), "25.4");
    }

    #[tokio::test]
    async fn test_create_charge_unsupported_chain_skips_backend() {
        let registry = Registry::builtin();
        let service = StaticTokenService::default();
        let charge = ChargeRequest::new("x", TokenSymbol::Usdc, "1").unwrap();

        let err = create_charge(&service, &registry, &charge, 10, "0xabc")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Asset(AssetError::UnsupportedAsset { chain_id: 10, .. })
        ));
        assert!(matches!(
            service.read("naspip;static;1;x").await,
            Err(ServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_read_payment_rejects_foreign_text() {
        let registry = Registry::builtin();
        let service = StaticTokenService::default();
        let err = read_payment(&service, &registry, "https://example.com/pay")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Service(ServiceError::NotNaspip)));
    }

    #[tokio::test]
    async fn test_read_payment_surfaces_malformed_asset() {
        let registry = Registry::builtin();
        let service = StaticTokenService::default();
        service
            .insert("naspip;corrupt", read_response("polygon-0xabc", "1"))
            .await;

        let err = read_payment(&service, &registry, "naspip;corrupt")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Asset(AssetError::Malformed(_))));
    }
}
