//! Direction of a trade.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which side of a trade is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    /// The input amount is fixed; output is computed.
    ExactInput,
    /// The output amount is fixed; input is computed.
    ExactOutput,
}

impl TradeType {
    /// Returns `true` for [`ExactInput`](Self::ExactInput).
    #[must_use]
    pub const fn is_exact_input(&self) -> bool {
        matches!(self, Self::ExactInput)
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactInput => write!(f, "EXACT_INPUT"),
            Self::ExactOutput => write!(f, "EXACT_OUTPUT"),
        }
    }
}
