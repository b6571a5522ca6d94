use crate::core::conversion::rgb_to_linear_rgb;
use crate::Float;

/// The coefficients for computing the WCAG 2.1 relative luminance from linear
/// sRGB coordinates.
const WCAG_LUMINANCE: &[Float; 3] = &[0.2126, 0.7152, 0.0722];

/// Compute the WCAG 2.1 relative luminance for the given sRGB coordinates.
pub(crate) fn luminance(coordinates: &[Float; 3]) -> Float {
    let [r, g, b] = rgb_to_linear_rgb(coordinates);
    let [c1, c2, c3] = *WCAG_LUMINANCE;
    r.mul_add(c1, g.mul_add(c2, b * c3))
}

/// Compute the WCAG 2.1 contrast ratio between two relative luminance values.
///
/// The result ranges `1.0..=21.0` and does not depend on the argument order.
pub(crate) fn contrast_ratio_of_luminance(luminance1: Float, luminance2: Float) -> Float {
    let lighter = luminance1.max(luminance2);
    let darker = luminance1.min(luminance2);
    (lighter + 0.05) / (darker + 0.05)
}

// --------------------------------------------------------------------------------------------------------------------

/// The coefficients for computing the contrast luminance for sRGB coordinates.
const SRGB_CONTRAST: &[Float; 3] = &[0.2126729, 0.7151522, 0.0721750];

/// Compute the contrast luminance for the given sRGB coordinates.
///
/// Said contrast luminance is a non-standard quantity, i.e., *not* the Y in
/// XYZ and *not* the WCAG relative luminance either. It linearizes channels
/// with a pure 2.4 exponent.
pub(crate) fn to_contrast_luminance(coordinates: &[Float; 3]) -> Float {
    fn linearize(value: Float) -> Float {
        let magnitude = value.abs();
        magnitude.powf(2.4).copysign(value)
    }

    let [c1, c2, c3] = *SRGB_CONTRAST;
    let [r, g, b] = *coordinates;

    linearize(r).mul_add(c1, linearize(g).mul_add(c2, linearize(b) * c3))
}

const BLACK_THRESHOLD: Float = 0.022;
const BLACK_EXPONENT: Float = 1.414;
const INPUT_CLAMP: Float = 0.0005;
const SCALE: Float = 1.14;
const OFFSET: Float = 0.027;
const OUTPUT_CLAMP: Float = 0.1;

/// Compute the perceptual contrast between text and background.
///
/// Using an algorithm that is surprisingly similar to the [Accessible
/// Perceptual Contrast Algorithm](https://github.com/Myndex/apca-w3), version
/// 0.0.98G-4g, this function computes the perceptual contrast between the
/// given contrast luminance for foreground and background. It is a soft
/// clamped approximation of the published algorithm, not a reimplementation;
/// the two disagree on some color pairs.
///
/// The arguments to this function are *not* interchangeable. The first
/// argument must be the contrast luminance for the foreground, i.e., text,
/// and the second argument must be the contrast luminance for the background.
/// The result is a fraction of the usual Lc quantity, i.e., scaled down by
/// 100, and is negative when the text is lighter than the background.
pub(crate) fn to_contrast(text_luminance: Float, background_luminance: Float) -> Float {
    // Make sure the luminance values are legit
    if text_luminance.is_nan()
        || !(0.0..=1.1).contains(&text_luminance)
        || background_luminance.is_nan()
        || !(0.0..=1.1).contains(&background_luminance)
    {
        return 0.0;
    }

    // Soft clip black
    let text_luminance = if text_luminance < BLACK_THRESHOLD {
        text_luminance + (BLACK_THRESHOLD - text_luminance).powf(BLACK_EXPONENT)
    } else {
        text_luminance
    };

    let background_luminance = if background_luminance < BLACK_THRESHOLD {
        background_luminance + (BLACK_THRESHOLD - background_luminance).powf(BLACK_EXPONENT)
    } else {
        background_luminance
    };

    // Clamp small ΔY to zero
    if (text_luminance - background_luminance).abs() < INPUT_CLAMP {
        return 0.0;
    };

    // Compute Lc (lightness contrast)
    if text_luminance < background_luminance {
        // Black on white
        let contrast = SCALE * (background_luminance.powf(0.56) - text_luminance.powf(0.57));

        if contrast < OUTPUT_CLAMP {
            0.0
        } else {
            contrast - OFFSET
        }
    } else {
        // White on black
        let contrast = SCALE * (background_luminance.powf(0.65) - text_luminance.powf(0.62));

        if -OUTPUT_CLAMP < contrast {
            0.0
        } else {
            contrast + OFFSET
        }
    }
}

#[cfg(test)]
mod test {
    use super::{contrast_ratio_of_luminance, luminance, to_contrast, to_contrast_luminance};
    use crate::assert_close_enough;
    use crate::core::conversion::from_24bit;

    #[test]
    fn test_wcag_luminance() {
        assert_close_enough!(luminance(&[1.0, 1.0, 1.0]), 1.0);
        assert_close_enough!(luminance(&[0.0, 0.0, 0.0]), 0.0);
        assert_close_enough!(luminance(&[1.0, 0.0, 0.0]), 0.2126);
    }

    #[test]
    fn test_wcag_ratio() {
        let white = luminance(&[1.0, 1.0, 1.0]);
        let black = luminance(&[0.0, 0.0, 0.0]);
        assert!((contrast_ratio_of_luminance(white, black) - 21.0).abs() < 0.01);
        assert!((contrast_ratio_of_luminance(black, white) - 21.0).abs() < 0.01);
        assert_close_enough!(contrast_ratio_of_luminance(white, white), 1.0);
    }

    #[test]
    fn test_contrast() {
        let white = to_contrast_luminance(&[1.0, 1.0, 1.0]);
        let black = to_contrast_luminance(&[0.0, 0.0, 0.0]);
        let blue = to_contrast_luminance(&from_24bit(0x3b, 0x82, 0xf6));

        assert_close_enough!(to_contrast(black, white), 1.0604067321268862);
        assert_close_enough!(to_contrast(white, black), -1.0788473318309848);
        assert_close_enough!(to_contrast(blue, white), 0.6389421014416421);
        assert_close_enough!(to_contrast(white, blue), -0.6938713143438832);

        // Out-of-domain luminance values yield no contrast.
        assert_eq!(to_contrast(-0.2, 0.5), 0.0);
        assert_eq!(to_contrast(0.5, 1.2), 0.0);
    }
}
