//! Build and parse asset identifiers

use anyhow::Result;
use naspip::{AssetIdentifier, Registry, TokenSymbol};

pub fn build(registry: &Registry, symbol: TokenSymbol, chain_id: u64) -> Result<()> {
    let asset = registry.build_asset_id(symbol, chain_id)?;
    println!("{asset}");
    Ok(())
}

pub fn parse(registry: &Registry, raw: &str) -> Result<()> {
    let asset = AssetIdentifier::parse(raw)?;
    println!("network:  {}", asset.short_name());
    println!("contract: {}", asset.contract_address());

    match registry.resolve_asset(&asset) {
        Some(resolved) => {
            println!("chain:    {} ({})", resolved.chain_id, resolved.network.display_name);
            match resolved.token {
                Some(token) => println!("token:    {} ({} decimals)", token.symbol, token.decimals),
                None => println!("token:    not a configured token"),
            }
        }
        None => println!("chain:    unsupported network"),
    }
    Ok(())
}
