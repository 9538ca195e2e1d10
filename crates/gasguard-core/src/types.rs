//! Core type definitions for GasGuard

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chain identifier as used by the aggregation API (e.g. "1", "42161")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ChainId(pub String);

impl ChainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChainId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient::string_or_number(deserializer)?;
        Ok(Self(raw.unwrap_or_default()))
    }
}

/// Token contract address. Comparisons between addresses must go through
/// [`TokenAddress::matches`], since providers return mixed-case hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAddress(pub String);

impl TokenAddress {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form used as a lookup key
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    /// Case-insensitive address equality
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TokenAddress {
    fn from(addr: &str) -> Self {
        Self::new(addr)
    }
}

/// Key identifying a token on a chain, address lower-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey {
    pub chain_id: ChainId,
    pub address: String,
}

impl TokenKey {
    pub fn new(chain_id: &ChainId, address: &TokenAddress) -> Self {
        Self {
            chain_id: chain_id.clone(),
            address: address.normalized(),
        }
    }
}

/// Integer amount in a token's smallest unit (wei, lamports, ...).
///
/// Serialized as a decimal string so large values survive JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseUnits(pub BigUint);

impl BaseUnits {
    pub fn zero() -> Self {
        Self(BigUint::default())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigUint::default()
    }
}

impl fmt::Display for BaseUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<BigUint> for BaseUnits {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for BaseUnits {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl FromStr for BaseUnits {
    type Err = num_bigint::ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigUint::from_str(s.trim()).map(Self)
    }
}

impl Serialize for BaseUnits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUnits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient::string_or_number(deserializer)?.unwrap_or_default();
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Deserializers for provider payloads that mix JSON strings and numbers
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accept a string, an integer/float, or null. Returns the textual form;
    /// numbers keep the literal digits they were sent with, however large.
    pub fn string_or_number<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected string or number, got {}",
                other
            ))),
        }
    }

    /// Accept a bool, a "true"/"false" string, or null
    pub fn bool_or_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(Value::String(s)) => Ok(Some(s.eq_ignore_ascii_case("true"))),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected bool, got {}",
                other
            ))),
        }
    }
}

/// Constants
pub mod constants {
    /// Decimal precision assumed when a token cannot be resolved
    pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;

    /// Largest decimal precision accepted from a token list
    pub const MAX_TOKEN_DECIMALS: u32 = 36;

    /// Slippage percentage used when the request omits one
    pub const DEFAULT_SLIPPAGE: &str = "0.5";

    /// Gas limit used when neither the route nor the chain table supplies one
    pub const DEFAULT_GAS_LIMIT: u64 = 300_000;

    /// Bridge name reported for routes without router metadata
    pub const UNKNOWN_BRIDGE: &str = "Unknown Bridge";
}
