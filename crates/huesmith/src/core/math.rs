use crate::Float;

/// An extension trait for floating point numbers.
///
/// For now, this trait exists solely to pre-compute the rounding factor for
/// equality comparisons, which depends on the floating point representation.
pub(crate) trait FloatExt {
    /// The factor determining rounding precision.
    ///
    /// When limiting a floating point number's precision, the number is
    /// multiplied by some factor, rounded, and divided by the same factor
    /// again. Typically, that factor is a power of ten, which directly
    /// translates into significant digits after the decimal.
    const ROUNDING_FACTOR: Self;
}

impl FloatExt for f64 {
    const ROUNDING_FACTOR: f64 = 1e12;
}

impl FloatExt for f32 {
    const ROUNDING_FACTOR: f32 = 1e4;
}

// --------------------------------------------------------------------------------------------------------------------

/// Wrap the hue into `0..360`.
#[inline]
pub(crate) fn wrap_hue(hue: Float) -> Float {
    let hue = hue.rem_euclid(360.0);
    // rem_euclid may round up to the modulus for tiny negative inputs.
    if hue == 360.0 {
        0.0
    } else {
        hue
    }
}

/// Compute the signed angular difference from one hue to another.
///
/// The result is the smallest rotation, in `-180.0..=180.0`, that carries
/// `from` onto `to`. A positive result rotates counterclockwise on the hue
/// wheel.
#[inline]
pub(crate) fn hue_difference(from: Float, to: Float) -> Float {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Interpolate between two hues along the shorter arc.
///
/// The fraction is clamped into `0..=1`, with 0 yielding `from` and 1 yielding
/// `to` (modulo wrapping).
#[inline]
pub(crate) fn interpolate_hue(from: Float, to: Float, fraction: Float) -> Float {
    let fraction = fraction.clamp(0.0, 1.0);
    wrap_hue(hue_difference(from, to).mul_add(fraction, from))
}
