//! Numeric kernel: overflow-exact integer and fixed-point arithmetic.
//!
//! Every curve and the concentrated-liquidity engine compute through these
//! functions. Nothing here allocates or panics; limits surface as
//! [`AmmError`](crate::error::AmmError) values.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`full_math`] | 512-bit intermediate `mul_div` with rounding control |
//! | [`sqrt`] | Newton integer square roots |
//! | [`log_exp`] | Q1.127 `ln`, `general_log`, `optimal_log`, `optimal_exp`, `power` |
//! | [`cast`] | [`SafeCast`] narrowing |
//! | [`tick_math`] | tick index ↔ Q64.96 sqrt price |
//! | [`sqrt_price_math`] | token amounts across a price interval |
//! | [`swap_math`] | one concentrated swap segment |
//! | [`liquidity_math`] | liquidity ↔ token amounts for a range |

pub mod cast;
pub mod full_math;
pub mod liquidity_math;
pub mod log_exp;
pub mod sqrt;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_math;

pub use cast::SafeCast;
pub use full_math::{
    div_rounding_up, mul_add_div, mul_div, mul_div_rounded, mul_div_rounding_up, mul_div_u128,
};
pub use log_exp::{general_log, ln, optimal_exp, optimal_log, power, FIXED_ONE};
pub use sqrt::{sqrt, sqrt_u128};
pub use swap_math::{compute_swap_step, SwapStep};
pub use tick_math::{
    sqrt_ratio_at_tick, tick_at_sqrt_ratio, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK,
};
