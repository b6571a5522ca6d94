use crate::core::FloatExt;
use crate::{Bits, Float};

/// Test macro for asserting the equality of floating point numbers.
///
/// This macro relies on [`to_eq_bits`] to normalize the two floating point
/// numbers by zeroing out not-a-numbers, reducing resolution, and dropping the
/// sign of negative zeros and then compares the resulting bit strings.
///
/// # Panics
///
/// This macro panics if the normalized bit strings are not identical. Its
/// message places the numbers below each other at the beginning of subsequent
/// lines for easy comparability.
#[macro_export]
macro_rules! assert_close_enough {
    ($f1:expr, $f2:expr $(,)?) => {
        let (f1, f2) = ($f1, $f2);
        let bits1 = $crate::to_eq_bits(f1);
        let bits2 = $crate::to_eq_bits(f2);
        assert_eq!(bits1, bits2, "quantities differ:\n{:?}\n{:?}", f1, f2);
    };
}

/// Test macro for asserting that two 24-bit colors nearly agree.
///
/// This macro compares the colors channel by channel and tolerates a
/// difference of at most one step per channel, which covers a conversion
/// round trip followed by quantization.
///
/// # Panics
///
/// This macro panics if any channel differs by more than one step. Its
/// message places the colors below each other at the beginning of subsequent
/// lines for easy comparability.
#[macro_export]
macro_rules! assert_rgb_close {
    ($color1:expr, $color2:expr $(,)?) => {
        let (color1, color2) = ($color1, $color2);
        let close = color1
            .iter()
            .zip(color2.iter())
            .all(|(channel1, channel2)| channel1.abs_diff(*channel2) <= 1);
        assert!(close, "colors differ:\n{:?}\n{:?}", color1, color2);
    };
}

// --------------------------------------------------------------------------------------------------------------------

/// Helper function to normalize a floating point number before hashing or
/// equality testing.
///
/// This function zeros out not-a-number, reduces significant digits after the
/// decimal, and drops the sign of negative zero and returns the result as a bit
/// string. It is only public because the [`assert_close_enough`] test macro
/// uses it.
#[doc(hidden)]
#[inline]
pub fn to_eq_bits(f: Float) -> Bits {
    // Eliminate not-a-number.
    let mut f = if f.is_nan() { 0.0 } else { f };

    // Reduce precision.
    f = (<Float as FloatExt>::ROUNDING_FACTOR * f).round();

    // Too much negativity!
    if f == -0.0 {
        f = 0.0
    }

    f.to_bits()
}

/// Normalize a hue before equality testing.
///
/// This function brings the rotation into `0..360` and scales it to unit
/// range, so that 0 and 360 degrees compare equal and hue resolution matches
/// that of the other coordinates.
#[inline]
pub(crate) fn to_eq_hue_bits(hue: Float) -> Bits {
    to_eq_bits(hue.rem_euclid(360.0) / 360.0)
}
