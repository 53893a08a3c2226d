//! 20-byte address identifiers for assets, pools and accounts

use std::fmt;
use std::str::FromStr;

use crate::errors::OracleError;

/// Address width in bytes
pub const ADDRESS_LEN: usize = 20;

macro_rules! address_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub [u8; ADDRESS_LEN]);

        impl $name {
            /// Create from raw bytes
            pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
                Self(bytes)
            }

            /// Address whose trailing eight bytes hold `value` (big-endian)
            pub fn from_low_u64(value: u64) -> Self {
                let mut bytes = [0u8; ADDRESS_LEN];
                bytes[ADDRESS_LEN - 8..].copy_from_slice(&value.to_be_bytes());
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = OracleError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let decoded =
                    hex::decode(digits).map_err(|_| OracleError::InvalidAddress(s.to_string()))?;
                let bytes: [u8; ADDRESS_LEN] = decoded
                    .try_into()
                    .map_err(|_| OracleError::InvalidAddress(s.to_string()))?;
                Ok(Self(bytes))
            }
        }

        #[cfg(feature = "client")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "client")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

address_type!(
    /// Asset (token) address
    AssetId
);

address_type!(
    /// Liquidity pool address
    PoolId
);

address_type!(
    /// Account allowed to call privileged operations
    AccountId
);
