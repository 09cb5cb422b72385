use std::collections::HashSet;

use crate::asset_id::AssetIdentifier;
use crate::error::{AssetError, ConfigError};
use crate::token::{TokenLookupKey, TokenMeta, TokenSource};
use crate::types::network::NetworkDescriptor;
use crate::types::token::{TokenDescriptor, TokenSymbol};

/// Read-only network and token tables with the lookups between them.
///
/// Every "not found" answer is an `Option`: a wallet connected to a chain we
/// don't support is ordinary control flow, not an error.
#[derive(Debug, Clone)]
pub struct Registry {
    networks: Vec<NetworkDescriptor>,
    tokens: Vec<TokenDescriptor>,
}

/// A parsed asset identifier matched against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub chain_id: u64,
    pub network: NetworkDescriptor,
    pub contract_address: String,
    /// `None` when the contract is not one of the configured tokens.
    pub token: Option<TokenMeta>,
}

impl Registry {
    /// Build a registry, rejecting tables that break the
    /// `chain_id <-> short_name` bijection.
    pub fn new(
        networks: Vec<NetworkDescriptor>,
        tokens: Vec<TokenDescriptor>,
    ) -> Result<Self, ConfigError> {
        let mut chain_ids = HashSet::new();
        let mut short_names = HashSet::new();
        for network in &networks {
            if !AssetIdentifier::is_valid_short_name(&network.short_name) {
                return Err(ConfigError::InvalidShortName(network.short_name.clone()));
            }
            if !chain_ids.insert(network.chain_id) {
                return Err(ConfigError::DuplicateChainId(network.chain_id));
            }
            if !short_names.insert(network.short_name.as_str()) {
                return Err(ConfigError::DuplicateShortName(network.short_name.clone()));
            }
        }

        let mut symbols = HashSet::new();
        for token in &tokens {
            if !symbols.insert(token.symbol) {
                return Err(ConfigError::DuplicateToken(token.symbol));
            }
            for (network, address) in &token.address_by_network {
                if !AssetIdentifier::is_valid_contract_address(address) {
                    return Err(ConfigError::InvalidAddress {
                        symbol: token.symbol,
                        network: network.clone(),
                    });
                }
            }
            let referenced = token
                .address_by_network
                .keys()
                .chain(token.decimals_override_by_network.keys());
            for network in referenced {
                if !short_names.contains(network.as_str()) {
                    return Err(ConfigError::UnknownNetwork {
                        symbol: token.symbol,
                        network: network.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            networks = networks.len(),
            tokens = tokens.len(),
            "registry loaded"
        );

        Ok(Self { networks, tokens })
    }

    /// Ethereum, Polygon and BSC with USDT and USDC.
    pub fn builtin() -> Self {
        Self {
            networks: NetworkDescriptor::builtin(),
            tokens: TokenDescriptor::builtin(),
        }
    }

    pub fn networks(&self) -> &[NetworkDescriptor] {
        &self.networks
    }

    pub fn tokens(&self) -> &[TokenDescriptor] {
        &self.tokens
    }

    pub fn network(&self, chain_id: u64) -> Option<&NetworkDescriptor> {
        self.networks.iter().find(|n| n.chain_id == chain_id)
    }

    /// First network declared with `short_name`.
    pub fn network_by_short_name(&self, short_name: &str) -> Option<&NetworkDescriptor> {
        self.networks.iter().find(|n| n.short_name == short_name)
    }

    pub fn token(&self, symbol: TokenSymbol) -> Option<&TokenDescriptor> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    pub fn network_short_name(&self, chain_id: u64) -> Option<&str> {
        self.network(chain_id).map(|n| n.short_name.as_str())
    }

    pub fn chain_id(&self, short_name: &str) -> Option<u64> {
        self.network_by_short_name(short_name).map(|n| n.chain_id)
    }

    pub fn is_token_supported(&self, symbol: TokenSymbol, chain_id: u64) -> bool {
        self.token_address(symbol, chain_id).is_some()
    }

    /// Contract address exactly as configured; never re-cased or checksummed.
    pub fn token_address(&self, symbol: TokenSymbol, chain_id: u64) -> Option<&str> {
        let short_name = self.network_short_name(chain_id)?;
        self.token(symbol)?
            .address_by_network
            .get(short_name)
            .map(|a| a.as_str())
    }

    /// Precision of `symbol` on `chain_id`.
    ///
    /// Always answers, even for unsupported pairs; check
    /// [`Registry::is_token_supported`] before trusting it for a transfer.
    /// Symbols missing from the table fall back to 6 decimals.
    pub fn token_decimals(&self, symbol: TokenSymbol, chain_id: u64) -> u8 {
        let Some(token) = self.token(symbol) else {
            return DEFAULT_DECIMALS;
        };
        self.network_short_name(chain_id)
            .and_then(|short_name| token.decimals_override_by_network.get(short_name))
            .copied()
            .unwrap_or(token.decimals)
    }

    /// Tokens deployed on `chain_id`, in declared order.
    pub fn supported_tokens(&self, chain_id: u64) -> Vec<TokenSymbol> {
        self.tokens
            .iter()
            .map(|t| t.symbol)
            .filter(|symbol| self.is_token_supported(*symbol, chain_id))
            .collect()
    }

    pub fn build_asset_id(
        &self,
        symbol: TokenSymbol,
        chain_id: u64,
    ) -> Result<AssetIdentifier, AssetError> {
        let unsupported = || AssetError::UnsupportedAsset { symbol, chain_id };
        let address = self.token_address(symbol, chain_id).ok_or_else(unsupported)?;
        let short_name = self.network_short_name(chain_id).ok_or_else(unsupported)?;
        Ok(AssetIdentifier::new(short_name, address))
    }

    /// Match a parsed identifier to a configured network, and to a configured
    /// token when the contract address is known.
    pub fn resolve_asset(&self, asset: &AssetIdentifier) -> Option<ResolvedAsset> {
        let network = self.network_by_short_name(asset.short_name())?;
        let key = TokenLookupKey::new(network.chain_id, asset.contract_address());
        Some(ResolvedAsset {
            chain_id: network.chain_id,
            network: network.clone(),
            contract_address: asset.contract_address().to_string(),
            token: self.lookup(&key),
        })
    }
}

const DEFAULT_DECIMALS: u8 = 6;

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TokenSource for Registry {
    fn lookup(&self, key: &TokenLookupKey) -> Option<TokenMeta> {
        for network in &self.networks {
            for token in &self.tokens {
                let Some(address) = token.address_by_network.get(&network.short_name) else {
                    continue;
                };
                if TokenLookupKey::new(network.chain_id, address) == *key {
                    return Some(TokenMeta {
                        symbol: token.symbol,
                        decimals: self.token_decimals(token.symbol, network.chain_id),
                        name: token.name.clone(),
                    });
                }
            }
        }
        None
    }
}
