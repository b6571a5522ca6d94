use crate::core::conversion::{oklab_to_srgb, oklch_to_oklab, srgb_to_oklab};
use crate::core::{delta_e_ok, wrap_hue};
use crate::Float;

/// Determine whether the sRGB coordinates are in gamut.
pub(crate) fn in_gamut(coordinates: &[Float; 3]) -> bool {
    coordinates.iter().all(|c| 0.0 <= *c && *c <= 1.0)
}

/// Clip the sRGB coordinates to the unit cube.
pub(crate) fn clip(coordinates: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = coordinates;
    [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
}

const JND: Float = 0.02;
const EPSILON: Float = 0.0001;

/// Map the given Oklch coordinates into the sRGB gamut.
///
/// This function implements the CSS Color 4 [gamut mapping
/// algorithm](https://drafts.csswg.org/css-color/#css-gamut-mapping). It
/// performs a binary search over chroma, at fixed lightness and hue, for a
/// color whose clipped version is within the *just noticeable difference*.
/// Since, by definition, the clipped version also is in gamut, it becomes the
/// result of the search. Plain channel clipping would shift the hue visibly;
/// this search does not.
pub(crate) fn oklch_to_gamut(value: &[Float; 3]) -> [Float; 3] {
    let [l, c, h] = *value;

    // Preliminary 1/2: Clamp lightness
    if 1.0 <= l {
        return [1.0, 1.0, 1.0];
    }
    if l <= 0.0 {
        return [0.0, 0.0, 0.0];
    }

    // Preliminary 2/2: Check gamut
    let mut current = [l, c.max(0.0), wrap_hue(h)];
    let candidate = oklab_to_srgb(&oklch_to_oklab(&current));
    if in_gamut(&candidate) {
        return candidate;
    }

    // Goal: Minimize just noticeable difference between current and clipped
    // colors
    let mut clipped = clip(&candidate);
    let difference = delta_e_ok(&srgb_to_oklab(&clipped), &oklch_to_oklab(&current));
    if difference < JND {
        return clipped;
    }

    // Strategy: Binary search by adjusting chroma in Oklch
    let mut min = 0.0;
    let mut max = current[1];
    let mut min_in_gamut = true;

    while EPSILON < max - min {
        let chroma = (min + max) / 2.0;
        current[1] = chroma;

        let current_srgb = oklab_to_srgb(&oklch_to_oklab(&current));

        if min_in_gamut && in_gamut(&current_srgb) {
            min = chroma;
            continue;
        }

        clipped = clip(&current_srgb);
        let difference = delta_e_ok(&srgb_to_oklab(&clipped), &oklch_to_oklab(&current));

        if difference < JND {
            if JND - difference < EPSILON {
                return clipped;
            }
            min_in_gamut = false;
            min = chroma;
        } else {
            max = chroma;
        }
    }

    clipped
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{in_gamut, oklch_to_gamut};
    use crate::core::conversion::{from_24bit, oklab_to_oklch, srgb_to_oklab, to_24bit};

    #[test]
    fn test_lightness_extremes() {
        assert_eq!(oklch_to_gamut(&[1.2, 0.3, 150.0]), [1.0, 1.0, 1.0]);
        assert_eq!(oklch_to_gamut(&[-0.1, 0.3, 150.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_in_gamut_passthrough() {
        let srgb = from_24bit(0x3b, 0x82, 0xf6);
        let oklch = oklab_to_oklch(&srgb_to_oklab(&srgb));
        let mapped = oklch_to_gamut(&oklch);
        assert_eq!(to_24bit(&mapped), [0x3b, 0x82, 0xf6]);
    }

    #[test]
    fn test_chroma_reduction_preserves_hue() {
        // A red far outside of what sRGB can display.
        let oklch = [0.63, 0.45, 29.0];
        let mapped = oklch_to_gamut(&oklch);
        assert!(in_gamut(&mapped), "{:?} is out of gamut", mapped);

        let roundtrip = oklab_to_oklch(&srgb_to_oklab(&mapped));
        assert!(
            (roundtrip[2] - 29.0).abs() < 3.0,
            "hue drifted from 29.0 to {}",
            roundtrip[2]
        );
        assert!(roundtrip[1] < 0.45, "chroma was not reduced: {:?}", roundtrip);
        assert!((roundtrip[0] - 0.63).abs() < 0.05, "lightness drifted: {:?}", roundtrip);
    }
}
