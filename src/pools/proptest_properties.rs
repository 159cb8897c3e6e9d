//! Property-based tests using `proptest` for pool and math invariants.
//!
//! 1. **Conservative rounding**: for any positive reserves and input,
//!    exact input then exact output on the returned pool state never
//!    hands the trader more than they paid.
//! 2. **Exact-output sufficiency**: the quoted input for an output buys at
//!    least that output.
//! 3. **Invariant growth**: `reserve0 · reserve1` never decreases.
//! 4. **Price direction**: selling token0 into a concentrated pool lowers
//!    its square-root price.
//! 5. **Tick round trip**: `tick_at(sqrt_at(t)) == t`.
//! 6. **Fraction algebra**: `a + b − b == a`, `a · b == b · a`.
//! 7. **Bit math**: `msb(2^i) == i`, `msb(2^i − 1) == i − 1`.

use num_bigint::BigInt;
use num_traits::One;
use proptest::prelude::*;

use crate::domain::{ChainId, CurrencyAmount, FeeAmount, Fraction, Tick, Token, TokenAddress};
use crate::error::RouteError;
use crate::math::tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_TICK, MIN_TICK};
use crate::math::{most_significant_bit, Q96};
use crate::pools::{ConcentratedPool, Pair};
use crate::traits::SwapPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok_a() -> Token {
    Token::new(ChainId::MAINNET, TokenAddress::from_bytes([1u8; 32]), 18, "A")
}

fn tok_b() -> Token {
    Token::new(ChainId::MAINNET, TokenAddress::from_bytes([2u8; 32]), 6, "B")
}

fn amount(token: &Token, raw: u128) -> CurrencyAmount {
    let Ok(x) = CurrencyAmount::from_raw_amount(token.clone().into(), raw) else {
        panic!("amount in range");
    };
    x
}

fn make_pair(ra: u128, rb: u128) -> Pair {
    let Ok(pair) = Pair::new(amount(&tok_a(), ra), amount(&tok_b(), rb)) else {
        panic!("valid pair");
    };
    pair
}

fn make_full_range(liquidity: u128, fee: FeeAmount) -> ConcentratedPool {
    let spacing = fee.tick_spacing();
    let net = i128::try_from(liquidity).unwrap_or(i128::MAX);
    let (Ok(lower), Ok(upper)) = (
        Tick::new(MIN_TICK / spacing * spacing, liquidity, net),
        Tick::new(MAX_TICK / spacing * spacing, liquidity, -net),
    ) else {
        panic!("ticks in range");
    };
    let Ok(pool) =
        ConcentratedPool::new(tok_a(), tok_b(), fee, Q96, liquidity, 0, vec![lower, upper])
    else {
        panic!("valid pool");
    };
    pool
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000u128..=1_000_000_000_000_000u128
}

/// Input as a percentage of the input reserve.
fn input_percent_strategy() -> impl Strategy<Value = u128> {
    1u128..=10u128
}

fn fee_strategy() -> impl Strategy<Value = FeeAmount> {
    prop::sample::select(FeeAmount::ALL.to_vec())
}

fn fraction_strategy() -> impl Strategy<Value = Fraction> {
    (any::<i64>(), 1i64..=i64::MAX).prop_map(|(n, d)| Fraction::new(n, d))
}

// ---------------------------------------------------------------------------
// Constant product
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rounding_favors_the_pool(
        ra in 1u128..=1_000_000_000_000_000_000u128,
        rb in 1u128..=1_000_000_000_000_000_000u128,
        raw_in in 1u128..=10_000_000_000_000_000_000u128,
    ) {
        let pair = make_pair(ra, rb);
        let input = amount(&tok_a(), raw_in);
        let (output, next) = match pair.get_output_amount(&input) {
            Ok(quote) => quote,
            Err(RouteError::InsufficientInput) => {
                return Err(TestCaseError::reject("input rounds to a zero output"));
            }
            Err(e) => return Err(TestCaseError::fail(format!("output quote failed: {e}"))),
        };
        let recovered = match next.get_input_amount(&output) {
            Ok((recovered, _)) => recovered,
            Err(RouteError::InsufficientReserves) => {
                return Err(TestCaseError::reject("output drains the pool"));
            }
            Err(e) => return Err(TestCaseError::fail(format!("input quote failed: {e}"))),
        };
        prop_assert!(
            recovered.quotient() >= input.quotient(),
            "recovered {} < original {}",
            recovered.quotient(), input.quotient()
        );
    }

    #[test]
    fn prop_exact_output_quote_is_sufficient(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        pct in input_percent_strategy(),
    ) {
        let pair = make_pair(ra, rb);
        let wanted = amount(&tok_b(), (rb * pct / 100).max(1));
        let Ok((input, _)) = pair.get_input_amount(&wanted) else {
            return Ok(());
        };
        let Ok((bought, _)) = pair.get_output_amount(&input) else {
            return Ok(());
        };
        prop_assert!(bought.quotient() >= wanted.quotient());
    }

    #[test]
    fn prop_invariant_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        pct in input_percent_strategy(),
        rounds in 1usize..=5,
    ) {
        let mut pair = make_pair(ra, rb);
        let k_before = pair.reserve0().quotient() * pair.reserve1().quotient();
        let input = amount(&tok_a(), (ra * pct / 100).max(1));
        for _ in 0..rounds {
            let Ok((_, next)) = pair.get_output_amount(&input) else {
                break;
            };
            pair = next;
        }
        let k_after = pair.reserve0().quotient() * pair.reserve1().quotient();
        prop_assert!(k_after >= k_before, "k shrank: {} < {}", k_after, k_before);
    }
}

// ---------------------------------------------------------------------------
// Concentrated liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_selling_token0_lowers_price(
        liquidity in 1_000_000_000u128..=1_000_000_000_000_000_000u128,
        raw_in in 1_000u128..=1_000_000_000u128,
        fee in fee_strategy(),
    ) {
        let pool = make_full_range(liquidity, fee);
        let Ok((output, next)) = pool.get_output_amount(&amount(&tok_a(), raw_in)) else {
            return Ok(());
        };
        prop_assert!(next.sqrt_ratio_x96() <= pool.sqrt_ratio_x96());
        prop_assert!(output.quotient() <= BigInt::from(raw_in));
    }

    #[test]
    fn prop_tick_round_trip(tick in MIN_TICK..MAX_TICK) {
        let Ok(sqrt) = get_sqrt_ratio_at_tick(tick) else {
            panic!("tick in range");
        };
        prop_assert_eq!(get_tick_at_sqrt_ratio(sqrt), Ok(tick));
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_add_then_subtract_is_identity(a in fraction_strategy(), b in fraction_strategy()) {
        let sum = &a + &b;
        prop_assert_eq!(&sum - &b, a);
    }

    #[test]
    fn prop_multiplication_commutes(a in fraction_strategy(), b in fraction_strategy()) {
        prop_assert_eq!(&a * &b, &b * &a);
    }

    #[test]
    fn prop_msb_of_powers_of_two(i in 1u32..=255) {
        let power = BigInt::one() << i;
        prop_assert_eq!(most_significant_bit(&power), Ok(i as u8));
        if i >= 2 {
            prop_assert_eq!(most_significant_bit(&(power - 1)), Ok((i - 1) as u8));
        }
    }
}
