//! Concentrated-liquidity fee tiers.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// Fee tiers supported by the concentrated-liquidity factory, in
/// hundredths of a basis point.
///
/// Each tier has a fixed tick spacing.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::FeeAmount;
///
/// let tier = FeeAmount::Medium;
/// assert_eq!(tier.value(), 2_500);
/// assert_eq!(tier.tick_spacing(), 50);
/// assert_eq!(FeeAmount::try_from(500), Ok(FeeAmount::Low));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FeeAmount {
    /// 0.01%.
    Lowest,
    /// 0.05%.
    Low,
    /// 0.25%.
    Medium,
    /// 1%.
    High,
}

impl FeeAmount {
    /// Every tier, lowest first.
    pub const ALL: [Self; 4] = [Self::Lowest, Self::Low, Self::Medium, Self::High];

    /// Fee in hundredths of a basis point (denominator `1_000_000`).
    #[must_use]
    pub const fn value(&self) -> u32 {
        match self {
            Self::Lowest => 100,
            Self::Low => 500,
            Self::Medium => 2_500,
            Self::High => 10_000,
        }
    }

    /// Tick spacing enforced for pools in this tier.
    #[must_use]
    pub const fn tick_spacing(&self) -> i32 {
        match self {
            Self::Lowest => 1,
            Self::Low => 10,
            Self::Medium => 50,
            Self::High => 200,
        }
    }
}

impl TryFrom<u32> for FeeAmount {
    type Error = RouteError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.value() == value)
            .ok_or(RouteError::InvalidArgument("FEE"))
    }
}

impl From<FeeAmount> for u32 {
    fn from(fee: FeeAmount) -> Self {
        fee.value()
    }
}

impl fmt::Display for FeeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeAmount({})", self.value())
    }
}
