use thiserror::Error;

use crate::types::token::TokenSymbol;

/// Unified error type for the NASPIP library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("amount error: {0}")]
    Amount(#[from] AmountError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("token service error: {0}")]
    Service(#[from] ServiceError),

    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("payment error: {0}")]
    Payment(String),
}

/// Errors produced while building or parsing asset identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The string is not of the form `n<network>_t<address>`.
    #[error("malformed asset identifier: {0:?}")]
    Malformed(String),

    #[error("{symbol} is not available on chain {chain_id}")]
    UnsupportedAsset { symbol: TokenSymbol, chain_id: u64 },
}

/// Errors in user-entered or wire amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid amount: {0:?}")]
    Invalid(String),

    #[error("amount {amount} has more than {max} fractional digits")]
    TooPrecise { amount: String, max: u8 },

    #[error("amount {0} is out of range")]
    OutOfRange(String),
}

/// Registry and configuration integrity errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate chain id {0} in network table")]
    DuplicateChainId(u64),

    #[error("duplicate network short name {0:?} in network table")]
    DuplicateShortName(String),

    /// Short names must be non-empty and free of the `_t` separator.
    #[error("invalid network short name {0:?}")]
    InvalidShortName(String),

    #[error("token {symbol} references unknown network {network:?}")]
    UnknownNetwork { symbol: TokenSymbol, network: String },

    /// Addresses must be non-empty and free of the `_t` separator.
    #[error("token {symbol} has an invalid address on network {network:?}")]
    InvalidAddress { symbol: TokenSymbol, network: String },

    #[error("token {0} is declared more than once")]
    DuplicateToken(TokenSymbol),

    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Errors talking to the backend token service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("token not found")]
    NotFound,

    #[error("not a NASPIP token")]
    NotNaspip,
}

/// Errors reported by the wallet connection layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("wallet is not connected")]
    NotConnected,

    #[error("network switch to chain {chain_id} failed: {reason}")]
    SwitchFailed { chain_id: u64, reason: String },
}
