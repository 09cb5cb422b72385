//! Decode a payment token

use anyhow::Result;
use naspip::{Config, HttpTokenService, NetworkStatus, PaymentInfo, Registry};

pub async fn run(
    config: &Config,
    registry: &Registry,
    token: &str,
    connected_chain: Option<u64>,
) -> Result<()> {
    let service = HttpTokenService::from_config(&config.backend)?;
    let info = naspip::read_payment(&service, registry, token).await?;

    println!("Identifier: {}", info.id);
    if let Some(order) = &info.order {
        println!("Merchant:   {} ({})", order.merchant.name, order.merchant.tax_id);
        for item in &order.items {
            println!(
                "  {} x{} @ {} = {} {}",
                item.description, item.quantity, item.unit_price, item.amount, item.coin_code
            );
        }
        println!("Total:      {} {}", order.coin_code, order.total_amount);
    }
    println!("From:       {}", info.issuer);
    println!("Amount:     {}", info.amount);
    println!(
        "Network:    {}",
        info.network_name.as_deref().unwrap_or("Unknown")
    );
    println!("Recipient:  {}", info.recipient);
    if let Some(expiry) = info.expires_at_display() {
        let expired = info.is_expired_now();
        println!("Expires:    {expiry}{}", if expired { " (expired)" } else { "" });
    }

    println!("{}", describe_status(registry, &info, connected_chain)?);
    Ok(())
}

/// What the payer has to do next, given the chain their wallet is on.
fn describe_status(
    registry: &Registry,
    info: &PaymentInfo,
    connected_chain: Option<u64>,
) -> Result<String> {
    let message = match info.network_status(connected_chain) {
        NetworkStatus::Ready => {
            let intent = info.transfer_intent()?;
            format!(
                "Pay {} {} to {}\n{}",
                intent.display_amount(),
                intent.symbol,
                intent.recipient,
                serde_json::to_string_pretty(&intent)?
            )
        }
        NetworkStatus::Mismatch { required, connected } => {
            let name = registry
                .network(required)
                .map(|n| n.display_name.as_str())
                .unwrap_or("Unknown");
            format!("Network mismatch: connected to {connected}, this payment requires {name} ({required})")
        }
        NetworkStatus::Disconnected => "Connect a wallet to pay".to_string(),
        NetworkStatus::UnknownRequirement => format!(
            "This payment uses an unsupported network ({})",
            info.asset.short_name()
        ),
    };
    Ok(message)
}
