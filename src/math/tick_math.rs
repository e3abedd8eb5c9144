//! Conversion between tick indices and Q64.96 square-root prices.
//!
//! A tick `i` marks the price `1.0001^i`; its square root is stored as a
//! Q64.96 fixed-point number in a [`U256`]:
//!
//! ```text
//! sqrt_ratio(i) = sqrt(1.0001^i) * 2^96
//! ```
//!
//! The forward direction multiplies pre-computed Q128.128 factors
//! `1 / sqrt(1.0001^(2^k))` for every set bit of `|i|`. The reverse direction
//! estimates the tick from the fixed-point logarithm and then settles on the
//! greatest tick whose price does not exceed the argument, so the pair is an
//! exact round trip over the whole domain.

use primitive_types::U256;

use super::full_math::{div_rounding_up, mul_div};
use super::log_exp::{ln, FIXED_ONE};
use crate::error::{AmmError, Result};

/// Smallest tick index.
pub const MIN_TICK: i32 = -887_272;

/// Largest tick index.
pub const MAX_TICK: i32 = 887_272;

/// `sqrt_ratio_at_tick(MIN_TICK)`.
pub const MIN_SQRT_RATIO: U256 = U256([4_295_128_739, 0, 0, 0]);

/// `sqrt_ratio_at_tick(MAX_TICK)`.
pub const MAX_SQRT_RATIO: U256 = U256([0x5d95_1d52_6398_8d26, 0xefd1_fc6a_5064_8849, 0xfffd_8963, 0]);

/// Fractional bits of a sqrt price.
pub const RESOLUTION: u32 = 96;

/// `ln(1.0001)` in Q1.127.
const LN_TICK_BASE: u128 = 17_013_267_696_839_095_457_833_983_268_909_703;

/// `1 / sqrt(1.0001^(2^k))` in Q128.128, indexed by bit `k`.
const INVERSE_FACTORS: [u128; 20] = [
    0xfffc_b933_bd6f_ad37_aa2d_162d_1a59_4001,
    0xfff9_7272_373d_4132_59a4_6990_580e_213a,
    0xfff2_e50f_5f65_6932_ef12_357c_f3c7_fdcc,
    0xffe5_caca_7e10_e4e6_1c36_24ea_a094_1cd0,
    0xffcb_9843_d60f_6159_c9db_5883_5c92_6644,
    0xff97_3b41_fa98_c081_472e_6896_dfb2_54c0,
    0xff2e_a164_66c9_6a38_43ec_78b3_26b5_2861,
    0xfe5d_ee04_6a99_a2a8_11c4_61f1_969c_3053,
    0xfcbe_86c7_900a_88ae_dcff_c83b_479a_a3a4,
    0xf987_a725_3ac4_1317_6f2b_074c_f781_5e54,
    0xf339_2b08_22b7_0005_940c_7a39_8e4b_70f3,
    0xe715_9475_a2c2_9b74_43b2_9c7f_a6e8_89d9,
    0xd097_f3bd_fd20_22b8_845a_d8f7_92aa_5825,
    0xa9f7_4646_2d87_0fdf_8a65_dc1f_90e0_61e5,
    0x70d8_69a1_56d2_a1b8_90bb_3df6_2baf_32f7,
    0x31be_135f_97d0_8fd9_8123_1505_542f_cfa6,
    0x09aa_508b_5b7a_84e1_c677_de54_f3e9_9bc9,
    0x005d_6af8_dedb_8119_6699_c329_225e_e604,
    0x0000_2216_e584_f5fa_1ea9_2604_1bed_fe98,
    0x0000_0000_048a_1703_91f7_dc42_444e_8fa2,
];

/// `2^96`, the sqrt price at tick zero.
#[must_use]
pub fn q96() -> U256 {
    U256::one() << RESOLUTION
}

/// Returns the Q64.96 sqrt price at `tick`.
///
/// # Errors
///
/// Returns [`AmmError::InvalidTick`] if `tick` lies outside
/// `[MIN_TICK, MAX_TICK]`.
pub fn sqrt_ratio_at_tick(tick: i32) -> Result<U256> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(AmmError::InvalidTick {
            tick,
            reason: "outside the tick domain",
        });
    }
    let magnitude = tick.unsigned_abs();

    let mut ratio = if magnitude & 1 != 0 {
        U256::from(INVERSE_FACTORS[0])
    } else {
        U256::one() << 128u32
    };
    for (bit, factor) in INVERSE_FACTORS.iter().enumerate().skip(1) {
        if magnitude & (1 << bit) != 0 {
            // ratio <= 2^128 and factor < 2^128
            ratio = (ratio * U256::from(*factor)) >> 128u32;
        }
    }
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounded up so the reverse lookup is exact
    let rounded = if ratio.low_u32() == 0 {
        U256::zero()
    } else {
        U256::one()
    };
    Ok((ratio >> 32u32) + rounded)
}

/// Returns the greatest tick whose sqrt price is at most `sqrt_price`.
///
/// # Errors
///
/// Returns [`AmmError::InvalidPrice`] if `sqrt_price` lies outside
/// `[MIN_SQRT_RATIO, MAX_SQRT_RATIO]`.
pub fn tick_at_sqrt_ratio(sqrt_price: U256) -> Result<i32> {
    if sqrt_price < MIN_SQRT_RATIO || sqrt_price > MAX_SQRT_RATIO {
        return Err(AmmError::InvalidPrice(
            "sqrt price outside [MIN_SQRT_RATIO, MAX_SQRT_RATIO]",
        ));
    }

    let estimate = estimate_tick(sqrt_price)?;
    let mut tick = estimate.clamp(i64::from(MIN_TICK), i64::from(MAX_TICK)) as i32;

    while tick < MAX_TICK && sqrt_ratio_at_tick(tick + 1)? <= sqrt_price {
        tick += 1;
    }
    while sqrt_ratio_at_tick(tick)? > sqrt_price {
        tick -= 1;
    }
    Ok(tick)
}

/// `2 * ln(sqrt_price / 2^96) / ln(1.0001)`, floored, from the Q1.127 log.
fn estimate_tick(sqrt_price: U256) -> Result<i64> {
    let one = U256::from(FIXED_ONE);
    let base = U256::from(LN_TICK_BASE);
    if sqrt_price >= q96() {
        let ratio = mul_div(sqrt_price, one, q96())?;
        let steps = (ln(ratio)? << 1u32) / base;
        Ok(steps.low_u64() as i64)
    } else {
        let ratio = mul_div(q96(), one, sqrt_price)?;
        let steps = div_rounding_up(ln(ratio)? << 1u32, base)?;
        Ok(-(steps.low_u64() as i64))
    }
}
