//! Exact conversion between tick indices and Q64.96 square-root prices.
//!
//! Both directions reproduce the on-chain contract: `get_sqrt_ratio_at_tick`
//! multiplies precomputed `1/sqrt(1.0001)^(2^i)` factors, and
//! `get_tick_at_sqrt_ratio` takes a fixed-point base-2 logarithm and
//! resolves the one-tick ambiguity by re-deriving the candidate price.
//!
//! ```
//! use hydra_route::math::tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MIN_TICK};
//!
//! let price = get_sqrt_ratio_at_tick(-60).expect("in range");
//! assert_eq!(get_tick_at_sqrt_ratio(price), Ok(-60));
//! assert!(get_sqrt_ratio_at_tick(MIN_TICK - 1).is_err());
//! ```

use alloy_primitives::U256;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::bit_math::msb_u256;
use crate::error::{Result, RouteError};

/// Smallest tick whose price fits in the Q64.96 range.
pub const MIN_TICK: i32 = -887_272;

/// Largest tick whose price fits in the Q64.96 range.
pub const MAX_TICK: i32 = -MIN_TICK;

/// `get_sqrt_ratio_at_tick(MIN_TICK)`.
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4_295_128_739, 0, 0, 0]);

/// `get_sqrt_ratio_at_tick(MAX_TICK)`.
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6_743_328_256_752_651_558, 17_280_870_778_742_802_505, 4_294_805_859, 0]);

/// `log_sqrt(1.0001)(2)` in Q128.128.
const LOG_SQRT_10001: u128 = 255_738_958_999_603_826_347_141;

/// Error margin subtracted to obtain the lower tick candidate.
const TICK_LOW: u128 = 3_402_992_956_809_132_418_596_140_100_660_247_210;

/// Error margin added to obtain the upper tick candidate.
const TICK_HIGH: u128 = 291_339_464_771_989_622_907_027_621_153_398_088_495;

/// `(bit, limb0, limb1)` factors `2^128 / sqrt(1.0001)^bit`.
const FACTORS: [(u32, u64, u64); 19] = [
    (0x2, 6_459_403_834_229_662_010, 18_444_899_583_751_176_498),
    (0x4, 17_226_890_335_427_755_468, 18_443_055_278_223_354_162),
    (0x8, 2_032_852_871_939_366_096, 18_439_367_220_385_604_838),
    (0x10, 14_545_316_742_740_207_172, 18_431_993_317_065_449_817),
    (0x20, 5_129_152_022_828_963_008, 18_417_254_355_718_160_513),
    (0x40, 4_894_419_605_888_772_193, 18_387_811_781_193_591_352),
    (0x80, 1_280_255_884_321_894_483, 18_329_067_761_203_520_168),
    (0x100, 15_924_666_964_335_305_636, 18_212_142_134_806_087_854),
    (0x200, 8_010_504_389_359_918_676, 17_980_523_815_641_551_639),
    (0x400, 10_668_036_004_952_895_731, 17_526_086_738_831_147_013),
    (0x800, 4_878_133_418_470_705_625, 16_651_378_430_235_024_244),
    (0x1000, 9_537_173_718_739_605_541, 15_030_750_278_693_429_944),
    (0x2000, 9_972_618_978_014_552_549, 12_247_334_978_882_834_399),
    (0x4000, 10_428_997_489_610_666_743, 8_131_365_268_884_726_200),
    (0x8000, 9_305_304_367_709_015_974, 3_584_323_654_723_342_297),
    (0x10000, 14_301_143_598_189_091_785, 696_457_651_847_595_233),
    (0x20000, 7_393_154_844_743_099_908, 26_294_789_957_452_057),
    (0x40000, 2_209_338_891_292_245_656, 37_481_735_321_082),
    (0x80000, 10_518_117_631_919_034_274, 76_158_723),
];

/// Returns `sqrt(1.0001^tick) * 2^96`.
///
/// # Errors
///
/// Returns [`RouteError::InvalidArgument`]`("TICK")` if `tick` is outside
/// `[MIN_TICK, MAX_TICK]`.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(RouteError::InvalidArgument("TICK"));
    }
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from_limbs([12_262_481_743_371_124_737, 18_445_821_805_675_392_311, 0, 0])
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };
    for (bit, lo, hi) in FACTORS {
        if abs_tick & bit != 0 {
            ratio = ratio.wrapping_mul(U256::from_limbs([lo, hi, 0, 0])) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up
    let round_up = !(ratio & U256::from(u32::MAX)).is_zero();
    Ok((ratio >> 32) + U256::from(u8::from(round_up)))
}

/// Returns the greatest tick whose square-root price is at most
/// `sqrt_ratio_x96`.
///
/// # Errors
///
/// Returns [`RouteError::InvalidArgument`]`("SQRT_RATIO")` unless
/// `MIN_SQRT_RATIO <= sqrt_ratio_x96 < MAX_SQRT_RATIO`.
pub fn get_tick_at_sqrt_ratio(sqrt_ratio_x96: U256) -> Result<i32> {
    if sqrt_ratio_x96 < MIN_SQRT_RATIO || sqrt_ratio_x96 >= MAX_SQRT_RATIO {
        return Err(RouteError::InvalidArgument("SQRT_RATIO"));
    }

    let ratio = sqrt_ratio_x96 << 32;
    let msb = usize::from(msb_u256(ratio));

    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    // integer part of log2, then 14 fractional bits by repeated squaring
    let mut log_2: i128 = (msb as i128 - 128) << 64;
    for shift in (50..=63).rev() {
        r = r.wrapping_mul(r) >> 127;
        let f: U256 = r >> 128;
        if !f.is_zero() {
            log_2 |= 1i128 << shift;
            r >>= 1;
        }
    }

    let log_sqrt10001 = BigInt::from(log_2) * BigInt::from(LOG_SQRT_10001);
    let tick_low = to_tick((&log_sqrt10001 - BigInt::from(TICK_LOW)) >> 128u32)?;
    let tick_high = to_tick((&log_sqrt10001 + BigInt::from(TICK_HIGH)) >> 128u32)?;

    if tick_low == tick_high || get_sqrt_ratio_at_tick(tick_high)? > sqrt_ratio_x96 {
        Ok(tick_low)
    } else {
        Ok(tick_high)
    }
}

fn to_tick(value: BigInt) -> Result<i32> {
    value.to_i32().ok_or(RouteError::Overflow("tick"))
}
