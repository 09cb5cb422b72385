//! Asset identifiers embedded in NASPIP payment tokens.
//!
//! An asset identifier names a token contract on a specific network:
//!
//! ```text
//! n<shortName>_t<contractAddress>
//! ```
//!
//! ```
//! use naspip::asset_id::AssetIdentifier;
//!
//! let id: AssetIdentifier = "npolygon_t0x3c499c542cef5e3811e1192ce70d8cc03d5c3359"
//!     .parse()
//!     .unwrap();
//! assert_eq!(id.short_name(), "polygon");
//! assert_eq!(id.contract_address(), "0x3c499c542cef5e3811e1192ce70d8cc03d5c3359");
//! assert_eq!(id.to_string(), "npolygon_t0x3c499c542cef5e3811e1192ce70d8cc03d5c3359");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

const NETWORK_PREFIX: char = 'n';
const TOKEN_SEPARATOR: &str = "_t";

/// A parsed `n<shortName>_t<contractAddress>` string.
///
/// Parsing only checks the shape. Whether the network exists is the
/// registry's concern, and the address is left for the wallet to validate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetIdentifier {
    short_name: String,
    contract_address: String,
}

impl AssetIdentifier {
    pub fn new(short_name: impl Into<String>, contract_address: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            contract_address: contract_address.into(),
        }
    }

    /// Parse an identifier taken from a payment token.
    pub fn parse(raw: &str) -> Result<Self, AssetError> {
        let malformed = || AssetError::Malformed(raw.to_string());

        let rest = raw.strip_prefix(NETWORK_PREFIX).ok_or_else(malformed)?;

        let mut parts = rest.split(TOKEN_SEPARATOR);
        let (Some(short_name), Some(address), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        if short_name.is_empty() || address.is_empty() {
            return Err(malformed());
        }

        Ok(Self::new(short_name, address))
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    /// Whether `short_name` can be embedded without breaking the format.
    pub(crate) fn is_valid_short_name(short_name: &str) -> bool {
        is_embeddable(short_name)
    }

    /// Same rule for the address half: `parse(build(..))` must hand it back.
    pub(crate) fn is_valid_contract_address(address: &str) -> bool {
        is_embeddable(address)
    }
}

fn is_embeddable(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(TOKEN_SEPARATOR)
}

impl fmt::Display for AssetIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{NETWORK_PREFIX}{}{TOKEN_SEPARATOR}{}",
            self.short_name, self.contract_address
        )
    }
}

impl FromStr for AssetIdentifier {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AssetIdentifier {
    type Error = AssetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AssetIdentifier> for String {
    fn from(value: AssetIdentifier) -> Self {
        value.to_string()
    }
}
