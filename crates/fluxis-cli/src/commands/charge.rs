//! Create a payment token for a charge

use anyhow::Result;
use naspip::{ChargeRequest, Config, HttpTokenService, Registry};

pub async fn run(
    config: &Config,
    registry: &Registry,
    charge: &ChargeRequest,
    chain_id: u64,
    recipient: &str,
) -> Result<()> {
    let service = HttpTokenService::from_config(&config.backend)?;
    let token = naspip::create_charge(&service, registry, charge, chain_id, recipient).await?;
    println!("{token}");
    Ok(())
}
