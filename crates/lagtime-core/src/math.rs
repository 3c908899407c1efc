//! Numeric helpers shared by the lag filter.

/// Natural logarithm of 0.001 (-60 dB as a linear amplitude ratio).
///
/// The lag coefficient `exp(LOG_001 / (lag * sample_rate))` is derived from
/// this constant. After `lag` seconds the remaining error of a step response
/// is exactly 0.1% of the initial error. Changing it changes what "lag time"
/// means, so it must stay `ln(0.001)`.
pub const LOG_001: f64 = -6.907_755_278_982_137;

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU slowdowns on most architectures. The
/// error term of a settling lag approaches that range indefinitely, so values
/// below 1e-20 are replaced with zero, leaving margin before IEEE 754
/// subnormals.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f64) -> f64 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
