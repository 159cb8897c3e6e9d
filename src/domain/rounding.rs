//! Explicit rounding mode for formatting and division.

/// Rounding applied when an exact rational value is rendered or divided
/// down to a fixed number of digits.
///
/// Modes act on the magnitude, so negative values round symmetrically:
/// `-1.5` rounds to `-2` under [`Rounding::HalfUp`] and to `-1` under
/// [`Rounding::Down`].
///
/// # Examples
///
/// ```
/// use hydra_route::domain::Rounding;
///
/// let r = Rounding::HalfUp;
/// assert!(!r.is_down());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Truncate toward zero.
    Down,
    /// Round to nearest, ties away from zero.
    #[default]
    HalfUp,
    /// Round away from zero whenever any remainder is left.
    Up,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }

    /// Returns a human-readable description of the rounding mode.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Down => "round towards zero",
            Self::HalfUp => "round half away from zero",
            Self::Up => "round away from zero",
        }
    }
}
