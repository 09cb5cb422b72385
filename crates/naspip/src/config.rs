//! Layered configuration: built-in defaults, then an optional TOML file, then
//! `FLUXIS_`-prefixed environment variables (`__` separates nested keys, e.g.
//! `FLUXIS_BACKEND__URL`).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registry::Registry;
use crate::types::network::NetworkDescriptor;
use crate::types::token::TokenDescriptor;

pub const DEFAULT_CONFIG_FILE: &str = "fluxis.toml";
pub const ENV_PREFIX: &str = "FLUXIS_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,

    #[serde(default = "NetworkDescriptor::builtin")]
    pub networks: Vec<NetworkDescriptor>,

    #[serde(default = "TokenDescriptor::builtin")]
    pub tokens: Vec<TokenDescriptor>,
}

/// Where the token service lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            networks: NetworkDescriptor::builtin(),
            tokens: TokenDescriptor::builtin(),
        }
    }
}

impl Config {
    /// The provider stack, exposed so callers can merge their own layers.
    pub fn figment(path: Option<&Path>) -> Figment {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment(path))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract().map_err(Box::new)?;
        tracing::info!(
            backend = %config.backend.url,
            networks = config.networks.len(),
            tokens = config.tokens.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Validate the network and token tables into a registry.
    pub fn registry(&self) -> Result<Registry, ConfigError> {
        Registry::new(self.networks.clone(), self.tokens.clone())
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;
    use crate::types::token::TokenSymbol;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load(None).expect("defaults load");
            assert_eq!(config, Config::default());
            let registry = config.registry().expect("builtin registry");
            assert_eq!(registry.chain_id("bep20"), Some(56));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_backend() {
        Jail::expect_with(|jail| {
            jail.set_env("FLUXIS_BACKEND__URL", "https://api.fluxis.example");
            jail.set_env("FLUXIS_BACKEND__TIMEOUT_SECS", "5");
            let config = Config::load(None).expect("env load");
            assert_eq!(config.backend.url, "https://api.fluxis.example");
            assert_eq!(config.backend.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn test_toml_replaces_tables() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "fluxis.toml",
                r#"
                [backend]
                url = "http://qr.local"
                timeout_secs = 10

                [[networks]]
                chainId = 137
                shortName = "polygon"
                displayName = "Polygon"

                [[tokens]]
                symbol = "USDC"
                name = "USD Coin"
                decimals = 6
                addresses = { polygon = "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359" }
                "#,
            )?;
            let config = Config::load(None).expect("toml load");
            let registry = config.registry().expect("valid tables");
            assert_eq!(registry.networks().len(), 1);
            assert!(registry.is_token_supported(TokenSymbol::Usdc, 137));
            assert!(!registry.is_token_supported(TokenSymbol::Usdt, 137));
            assert_eq!(config.backend.url, "http://qr.local");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_tables_fail_registry() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [[networks]]
                chainId = 1
                shortName = "erc20"
                displayName = "Ethereum"

                [[networks]]
                chainId = 1
                shortName = "mainnet"
                displayName = "Mainnet"
                "#,
            )?;
            let config = Config::load(Some(Path::new("custom.toml"))).expect("toml load");
            assert!(matches!(
                config.registry(),
                Err(ConfigError::DuplicateChainId(1))
            ));
            Ok(())
        });
    }

    #[test]
    fn test_bad_value_is_load_error() {
        Jail::expect_with(|jail| {
            jail.set_env("FLUXIS_BACKEND__TIMEOUT_SECS", "soon");
            assert!(matches!(Config::load(None), Err(ConfigError::Load(_))));
            Ok(())
        });
    }
}
