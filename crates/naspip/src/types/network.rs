use serde::{Deserialize, Serialize};

/// A supported blockchain network.
///
/// `chain_id` is the public identifier the wallet reports; `short_name` is the
/// key embedded in asset identifiers (`n<short_name>_t<address>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    #[serde(rename = "chainId")]
    pub chain_id: u64,

    #[serde(rename = "shortName")]
    pub short_name: String,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NetworkDescriptor {
    pub fn new(chain_id: u64, short_name: &str, display_name: &str) -> Self {
        Self {
            chain_id,
            short_name: short_name.to_string(),
            display_name: display_name.to_string(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    /// Ethereum mainnet.
    pub fn ethereum() -> Self {
        Self::new(1, "erc20", "Ethereum").with_icon("https://assets.belo.app/images/eth.png")
    }

    /// Polygon PoS.
    pub fn polygon() -> Self {
        Self::new(137, "polygon", "Polygon")
            .with_icon("https://assets.belo.app/images/blockchains/polygon.png")
    }

    /// BNB Smart Chain.
    pub fn bsc() -> Self {
        Self::new(56, "bep20", "BSC")
            .with_icon("https://assets.belo.app/images/blockchains/bsc.png")
    }

    /// The networks Fluxis ships with, in declared order.
    pub fn builtin() -> Vec<Self> {
        vec![Self::ethereum(), Self::polygon(), Self::bsc()]
    }
}
