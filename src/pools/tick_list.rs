//! Sorted initialized ticks of a concentrated-liquidity pool.

use std::sync::Arc;

use crate::domain::Tick;
use crate::error::{Result, RouteError};

/// Immutable, validated list of initialized ticks.
///
/// The list is reference-counted, so every pool state produced by a
/// simulated swap shares the same tick data.
///
/// Invariants enforced by [`TickList::new`]:
///
/// - `tick_spacing > 0`
/// - every index is a multiple of `tick_spacing`
/// - indices are strictly increasing
/// - the net liquidity of all ticks sums to zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickList {
    ticks: Arc<[Tick]>,
    tick_spacing: i32,
}

impl TickList {
    /// Validates and wraps `ticks`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`] naming the violated
    /// invariant: `TICK_SPACING_NONZERO`, `TICK_SPACING`, `ZERO_NET` or
    /// `SORTED`.
    pub fn new(ticks: Vec<Tick>, tick_spacing: i32) -> Result<Self> {
        if tick_spacing <= 0 {
            return Err(RouteError::InvalidArgument("TICK_SPACING_NONZERO"));
        }
        if ticks.iter().any(|t| t.index() % tick_spacing != 0) {
            return Err(RouteError::InvalidArgument("TICK_SPACING"));
        }
        let net = ticks
            .iter()
            .try_fold(0i128, |acc, t| acc.checked_add(t.liquidity_net()))
            .ok_or(RouteError::Overflow("liquidity net"))?;
        if net != 0 {
            return Err(RouteError::InvalidArgument("ZERO_NET"));
        }
        if ticks.windows(2).any(|w| w[0].index() >= w[1].index()) {
            return Err(RouteError::InvalidArgument("SORTED"));
        }
        Ok(Self {
            ticks: ticks.into(),
            tick_spacing,
        })
    }

    /// Returns the ticks in ascending order.
    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Returns the tick spacing.
    #[must_use]
    pub const fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    /// Returns the number of initialized ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Returns `true` if no tick is initialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Returns the initialized tick at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`] if no tick is initialized
    /// at `index`.
    pub fn get_tick(&self, index: i32) -> Result<&Tick> {
        self.ticks
            .binary_search_by_key(&index, Tick::index)
            .map(|i| &self.ticks[i])
            .map_err(|_| RouteError::InvalidArgument("NOT_CONTAINED"))
    }

    /// `true` if `tick` is below the first initialized tick.
    #[must_use]
    pub fn is_below_smallest(&self, tick: i32) -> bool {
        self.ticks.first().map_or(true, |t| tick < t.index())
    }

    /// `true` if `tick` is at or above the last initialized tick.
    #[must_use]
    pub fn is_at_or_above_largest(&self, tick: i32) -> bool {
        self.ticks.last().map_or(true, |t| tick >= t.index())
    }

    /// The closest initialized tick at or below `tick` (`lte`) or strictly
    /// above it.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`] if no such tick exists.
    pub fn next_initialized_tick(&self, tick: i32, lte: bool) -> Result<&Tick> {
        // number of ticks with index <= tick
        let at_or_below = self.ticks.partition_point(|t| t.index() <= tick);
        let position = if lte {
            at_or_below.checked_sub(1)
        } else {
            Some(at_or_below)
        };
        position
            .and_then(|i| self.ticks.get(i))
            .ok_or(RouteError::InvalidArgument("NEXT_TICK"))
    }

    /// Next tick to step to, searching no further than the current 256-tick
    /// bitmap word.
    ///
    /// Returns the tick index and whether it is initialized.  When no
    /// initialized tick lies within the word, the word boundary is returned
    /// with `false`.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures from [`TickList::next_initialized_tick`].
    pub fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
    ) -> Result<(i32, bool)> {
        let compressed = tick.div_euclid(self.tick_spacing);

        if lte {
            let word_pos = compressed >> 8;
            let minimum = (word_pos << 8) * self.tick_spacing;
            if self.is_below_smallest(tick) {
                return Ok((minimum, false));
            }
            let index = self.next_initialized_tick(tick, true)?.index();
            let next = minimum.max(index);
            Ok((next, next == index))
        } else {
            let word_pos = (compressed + 1) >> 8;
            let maximum = ((word_pos + 1) << 8) * self.tick_spacing - 1;
            if self.is_at_or_above_largest(tick) {
                return Ok((maximum, false));
            }
            let index = self.next_initialized_tick(tick, false)?.index();
            let next = maximum.min(index);
            Ok((next, next == index))
        }
    }
}
