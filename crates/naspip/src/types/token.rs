use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stablecoins accepted for charges and payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenSymbol {
    Usdt,
    Usdc,
}

impl TokenSymbol {
    pub const ALL: [TokenSymbol; 2] = [TokenSymbol::Usdt, TokenSymbol::Usdc];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSymbol::Usdt => "USDT",
            TokenSymbol::Usdc => "USDC",
        }
    }
}

impl fmt::Display for TokenSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token symbol: {0:?}")]
pub struct UnknownTokenSymbol(pub String);

impl FromStr for TokenSymbol {
    type Err = UnknownTokenSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USDT" => Ok(TokenSymbol::Usdt),
            "USDC" => Ok(TokenSymbol::Usdc),
            _ => Err(UnknownTokenSymbol(s.to_string())),
        }
    }
}

/// Static description of a token and its deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub symbol: TokenSymbol,

    pub name: String,

    /// Default precision, used wherever no per-network override exists.
    pub decimals: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Contract address per network short name. Absence means unsupported.
    #[serde(rename = "addresses")]
    #[serde(default)]
    pub address_by_network: HashMap<String, String>,

    /// Precision overrides per network short name.
    #[serde(rename = "decimalsOverride")]
    #[serde(default)]
    pub decimals_override_by_network: HashMap<String, u8>,
}

impl TokenDescriptor {
    pub fn new(symbol: TokenSymbol, name: &str, decimals: u8) -> Self {
        Self {
            symbol,
            name: name.to_string(),
            decimals,
            icon: None,
            address_by_network: HashMap::new(),
            decimals_override_by_network: HashMap::new(),
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn deployed_on(mut self, short_name: &str, address: &str) -> Self {
        self.address_by_network
            .insert(short_name.to_string(), address.to_string());
        self
    }

    pub fn with_decimals_on(mut self, short_name: &str, decimals: u8) -> Self {
        self.decimals_override_by_network
            .insert(short_name.to_string(), decimals);
        self
    }

    /// Tether USD on Ethereum, Polygon and BSC.
    pub fn usdt() -> Self {
        Self::new(TokenSymbol::Usdt, "Tether USD", 6)
            .with_icon("https://assets.belo.app/images/usdt.png")
            .deployed_on("erc20", "0xdAC17F958D2ee523a2206206994597C13D831ec7")
            .deployed_on("polygon", "0xc2132D05D31c914a87C6611C10748AEb04B58e8F")
            .deployed_on("bep20", "0x55d398326f99059fF775485246999027B3197955")
            .with_decimals_on("bep20", 18)
    }

    /// USD Coin on Ethereum, Polygon and BSC.
    pub fn usdc() -> Self {
        Self::new(TokenSymbol::Usdc, "USD Coin", 6)
            .with_icon("https://assets.belo.app/images/usdc.png")
            .deployed_on("erc20", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")
            .deployed_on("polygon", "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359")
            .deployed_on("bep20", "0x8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d")
            .with_decimals_on("bep20", 18)
    }

    pub fn builtin() -> Vec<Self> {
        vec![Self::usdt(), Self::usdc()]
    }
}
