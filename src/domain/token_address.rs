//! 32-byte account address of a token.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};

/// Width of an on-chain account address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// The on-chain account address identifying a token.
///
/// Stored as the 32-byte big-endian account encoding, so short forms
/// (`0xa`) and long forms (`0x000…0a`) parse to the same value and the
/// derived ordering equals a case-insensitive comparison of the long hex
/// form.
///
/// The ordering is numeric whatever form the address was written in.
/// Comparing the strings as given would put `0xa` after `0x1001`; here
/// `0xa` sorts first, as does its long form.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::TokenAddress;
///
/// let short = TokenAddress::parse("0xA").expect("valid");
/// let long = TokenAddress::parse(
///     "0x000000000000000000000000000000000000000000000000000000000000000a",
/// )
/// .expect("valid");
/// assert_eq!(short, long);
/// assert_eq!(short.as_bytes()[31], 0x0a);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAddress([u8; ADDRESS_LENGTH]);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses a `0x`-prefixed hex address of 1 to 64 digits, any case.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`] if the prefix is missing,
    /// the digit count is out of range, or a non-hex digit is present.
    pub fn parse(input: &str) -> Result<Self> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .ok_or(RouteError::InvalidArgument("address must start with 0x"))?;
        if digits.is_empty() || digits.len() > ADDRESS_LENGTH * 2 {
            return Err(RouteError::InvalidArgument(
                "address must have 1 to 64 hex digits",
            ));
        }
        let even = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_owned()
        };
        let decoded = hex::decode(even)
            .map_err(|_| RouteError::InvalidArgument("address is not valid hex"))?;
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - decoded.len()..].copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    /// Lowercase `0x` + 64 hex digits.
    #[must_use]
    pub fn to_long_string(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for TokenAddress {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TokenAddress {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TokenAddress> for String {
    fn from(address: TokenAddress) -> Self {
        address.to_long_string()
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_string())
    }
}

impl fmt::Debug for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAddress({})", self.to_long_string())
    }
}
