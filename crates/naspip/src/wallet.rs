use std::future::Future;

use crate::error::WalletError;
use crate::payment::{NetworkStatus, PaymentInfo};

/// The wallet connection layer: reports the active chain and switches it.
pub trait WalletConnection {
    /// Chain the wallet is connected to, if any.
    fn chain_id(&self) -> Option<u64>;

    /// Ask the wallet to switch to `chain_id`.
    fn switch_chain(&self, chain_id: u64) -> impl Future<Output = Result<(), WalletError>> + Send;
}

/// Bring the wallet onto the chain `payment` requires.
///
/// Only a mismatch triggers a switch request. Returns the status observed
/// after any switch.
pub async fn ensure_network<W>(wallet: &W, payment: &PaymentInfo) -> Result<NetworkStatus, WalletError>
where
    W: WalletConnection + Sync,
{
    let status = payment.network_status(wallet.chain_id());
    let Some(target) = status.switch_target() else {
        return Ok(status);
    };

    tracing::info!(
        payment_id = %payment.id,
        from = wallet.chain_id(),
        to = target,
        "requesting network switch"
    );
    wallet.switch_chain(target).await.inspect_err(|e| {
        tracing::warn!(error = %e, "network switch failed");
    })?;

    Ok(payment.network_status(wallet.chain_id()))
}
