use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Seconds are the atomic unit of build time.
pub type Seconds = u64;

/// Convert an f64 to Fixed64. Use only for input parsing, never in the plan pass.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Convert Fixed64 to f64. Use only for display.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Scale a whole-second duration by a Fixed64 factor, rounding to the
/// nearest second. Saturates at `Seconds::MAX` if the product does not fit.
pub fn scale_seconds(v: Seconds, factor: Fixed64) -> Seconds {
    let Some(v) = Fixed64::checked_from_num(v) else {
        return Seconds::MAX;
    };
    let Some(scaled) = v.checked_mul(factor) else {
        return Seconds::MAX;
    };
    let Some(rounded) = scaled.checked_round() else {
        return Seconds::MAX;
    };
    if rounded < Fixed64::ZERO {
        0
    } else {
        rounded.to_num::<u64>()
    }
}
