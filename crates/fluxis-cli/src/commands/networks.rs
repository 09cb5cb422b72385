//! List supported networks

use anyhow::Result;
use naspip::Registry;

pub fn run(registry: &Registry) -> Result<()> {
    for network in registry.networks() {
        println!(
            "{:<10} chain {:<6} {}",
            network.short_name, network.chain_id, network.display_name
        );
        for symbol in registry.supported_tokens(network.chain_id) {
            let address = registry
                .token_address(symbol, network.chain_id)
                .unwrap_or_default();
            let decimals = registry.token_decimals(symbol, network.chain_id);
            println!("    {symbol:<5} {address} ({decimals} decimals)");
        }
    }
    Ok(())
}
