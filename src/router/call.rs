//! Entry-function calls produced by the router and quoter.

use core::fmt;

use alloy_primitives::U256;
use num_bigint::BigInt;

use crate::domain::{CurrencyAmount, TokenAddress};

/// One positional argument of an entry-function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArgument {
    /// An account or token address.
    Address(TokenAddress),
    /// An address the caller may leave unset.
    OptionalAddress(Option<TokenAddress>),
    /// Token addresses of a constant-product path.
    Addresses(Vec<TokenAddress>),
    /// Packed concentrated or mixed path.
    Bytes(Vec<u8>),
    /// Fee tier in hundredths of a bip.
    Fee(u32),
    /// Unix-seconds deadline.
    Deadline(u64),
    /// Raw token amount.
    Amount(BigInt),
    /// Q64.96 square-root price limit; zero means none.
    SqrtPriceLimit(U256),
}

impl CallArgument {
    /// Amount argument holding `value`.
    #[must_use]
    pub fn amount(value: impl Into<BigInt>) -> Self {
        Self::Amount(value.into())
    }

    /// Amount argument holding the raw quotient of `amount`.
    #[must_use]
    pub fn from_currency_amount(amount: &CurrencyAmount) -> Self {
        Self::Amount(amount.quotient())
    }

    /// The amount, if this is an [`Amount`](Self::Amount) argument.
    #[must_use]
    pub const fn as_amount(&self) -> Option<&BigInt> {
        match self {
            Self::Amount(value) => Some(value),
            _ => None,
        }
    }

    /// The bytes, if this is a [`Bytes`](Self::Bytes) argument.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Display for CallArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(addr) => write!(f, "{addr}"),
            Self::OptionalAddress(Some(addr)) => write!(f, "{addr}"),
            Self::OptionalAddress(None) => write!(f, "none"),
            Self::Addresses(addrs) => {
                write!(f, "[")?;
                for (i, addr) in addrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{addr}")?;
                }
                write!(f, "]")
            }
            Self::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            Self::Fee(fee) => write!(f, "{fee}"),
            Self::Deadline(secs) => write!(f, "{secs}"),
            Self::Amount(value) => write!(f, "{value}"),
            Self::SqrtPriceLimit(limit) => write!(f, "{limit}"),
        }
    }
}

/// A fully-qualified entry function and its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCall {
    function: String,
    args: Vec<CallArgument>,
}

impl SwapCall {
    /// Creates a call to `function` (`{address}::{module}::{method}`).
    #[must_use]
    pub const fn new(function: String, args: Vec<CallArgument>) -> Self {
        Self { function, args }
    }

    /// Returns the fully-qualified function name.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Returns the method name, the last `::` segment of the function.
    #[must_use]
    pub fn method(&self) -> &str {
        self.function.rsplit("::").next().unwrap_or(&self.function)
    }

    /// Returns the arguments in call order.
    #[must_use]
    pub fn args(&self) -> &[CallArgument] {
        &self.args
    }
}

impl fmt::Display for SwapCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}
