use crate::core::wrap_hue;
use crate::Float;

/// Convert the given 24-bit RGB coordinates to floating point coordinates.
#[inline]
pub(crate) fn from_24bit(r: u8, g: u8, b: u8) -> [Float; 3] {
    [r as Float / 255.0, g as Float / 255.0, b as Float / 255.0]
}

/// Convert the color coordinates to 24-bit representation.
///
/// This function assumes that the coordinates belong to an in-gamut sRGB
/// color, i.e., that they range `0..=1`. Even if that is not the case, the
/// conversion automatically clamps coordinates to the range `0x00..=0xff`.
pub(crate) fn to_24bit(coordinates: &[Float; 3]) -> [u8; 3] {
    let [r, g, b] = *coordinates;
    [
        (r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (b.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
#[inline]
fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates from gamma-corrected RGB to linear RGB using sRGB's
/// gamma. This is a one-hop, direct conversion.
pub(crate) fn rgb_to_linear_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        let magnitude = value.abs();
        if magnitude <= 0.04045 {
            value / 12.92
        } else {
            ((magnitude + 0.055) / 1.055).powf(2.4).copysign(value)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

/// Convert coordinates from linear RGB to gamma-corrected RGB using sRGB's
/// gamma. This is a one-hop, direct conversion.
pub(crate) fn linear_rgb_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        let magnitude = value.abs();
        if magnitude <= 0.00313098 {
            value * 12.92
        } else {
            magnitude
                .powf(1.0 / 2.4)
                .mul_add(1.055, -0.055)
                .copysign(value)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

// --------------------------------------------------------------------------------------------------------------------
// https://bottosson.github.io/posts/oklab/

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_OKLMS: [[Float; 3]; 3] = [
    [ 0.4122214708, 0.5363325363, 0.0514459929 ],
    [ 0.2119034982, 0.6806995451, 0.1073969566 ],
    [ 0.0883024619, 0.2817188376, 0.6299787005 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLMS_TO_OKLAB: [[Float; 3]; 3] = [
    [ 0.2104542553,  0.7936177850, -0.0040720468 ],
    [ 1.9779984951, -2.4285922050,  0.4505937099 ],
    [ 0.0259040371,  0.7827717662, -0.8086757660 ],
];

/// Convert coordinates for linear sRGB to Oklab. This is a one-hop, direct
/// conversion, even though it requires two matrix multiplications and a
/// coordinate-wise cube root.
fn linear_srgb_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&LINEAR_SRGB_TO_OKLMS, value);
    multiply(&OKLMS_TO_OKLAB, &[l.cbrt(), m.cbrt(), s.cbrt()])
}

// https://bottosson.github.io/posts/oklab/

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLAB_TO_OKLMS: [[Float; 3]; 3] = [
    [ 1.0,  0.3963377774,  0.2158037573 ],
    [ 1.0, -0.1055613458, -0.0638541728 ],
    [ 1.0, -0.0894841775, -1.2914855480 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLMS_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  4.0767416621, -3.3077115913,  0.2309699292 ],
    [ -1.2684380046,  2.6097574011, -0.3413193965 ],
    [ -0.0041960863, -0.7034186147,  1.7076147010 ],
];

/// Convert coordinates for Oklab to linear sRGB. This is a one-hop, direct
/// conversion, even though it requires two matrix multiplications and a
/// coordinate-wise exponential.
fn oklab_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&OKLAB_TO_OKLMS, value);
    multiply(&OKLMS_TO_LINEAR_SRGB, &[l.powi(3), m.powi(3), s.powi(3)])
}

/// Convert coordinates for sRGB to Oklab. This is a two-hop conversion.
#[inline]
pub(crate) fn srgb_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let linear_srgb = rgb_to_linear_rgb(value);
    linear_srgb_to_oklab(&linear_srgb)
}

/// Convert coordinates for Oklab to sRGB. This is a two-hop conversion. The
/// result may well be out of gamut, with coordinates outside `0..=1`.
#[inline]
pub(crate) fn oklab_to_srgb(value: &[Float; 3]) -> [Float; 3] {
    let linear_srgb = oklab_to_linear_srgb(value);
    linear_rgb_to_rgb(&linear_srgb)
}

// --------------------------------------------------------------------------------------------------------------------

/// The chroma below which a color counts as achromatic and hence has no
/// meaningful hue.
pub(crate) const ACHROMATIC_CHROMA: Float = 0.0002;

/// Convert coordinates for Oklch to Oklab. This is a one-hop, direct
/// conversion.
#[allow(non_snake_case)]
pub(crate) fn oklch_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [L, C, h] = *value;
    let hue_radian = h.to_radians();
    [L, C * hue_radian.cos(), C * hue_radian.sin()]
}

/// Convert coordinates for Oklab to Oklch. This is a one-hop, direct
/// conversion. An achromatic color has no meaningful hue angle; by convention
/// both chroma and hue come out as zero for such colors.
#[allow(non_snake_case)]
pub(crate) fn oklab_to_oklch(value: &[Float; 3]) -> [Float; 3] {
    let [L, a, b] = *value;

    let a_m = a.abs();
    if a_m < ACHROMATIC_CHROMA && b.abs() < ACHROMATIC_CHROMA {
        return [L, 0.0, 0.0];
    }

    // per herbie 2.1
    let C = if a_m < b { b.hypot(a_m) } else { a_m.hypot(b) };

    let h = b.atan2(a).to_degrees();
    let h = if h.is_sign_negative() { h + 360.0 } else { h };

    [L, C, h]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert sRGB coordinates to HSL with the hue in degrees and saturation and
/// lightness as fractions in `0..=1`. An achromatic color has hue zero by
/// convention.
pub(crate) fn srgb_to_hsl(value: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = *value;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if max == min {
        return [0.0, 0.0, lightness];
    }

    let delta = max - min;
    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    [sector_hue(r, g, b, max, delta), saturation, lightness]
}

/// Convert HSL coordinates, with the hue in degrees and saturation and
/// lightness as fractions, to sRGB.
pub(crate) fn hsl_to_srgb(value: &[Float; 3]) -> [Float; 3] {
    let [h, s, l] = *value;

    if s <= 0.0 {
        return [l, l, l];
    }

    fn hue_component(p: Float, q: Float, t: Float) -> Float {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            (q - p).mul_add(6.0 * t, p)
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            (q - p).mul_add((2.0 / 3.0 - t) * 6.0, p)
        } else {
            p
        }
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h / 360.0;

    [
        hue_component(p, q, h + 1.0 / 3.0),
        hue_component(p, q, h),
        hue_component(p, q, h - 1.0 / 3.0),
    ]
}

/// Convert sRGB coordinates to HSV with the hue in degrees and saturation and
/// value as fractions in `0..=1`. An achromatic color has hue zero by
/// convention.
pub(crate) fn srgb_to_hsv(value: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = *value;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max == 0.0 { 0.0 } else { delta / max };
    if delta == 0.0 {
        return [0.0, saturation, max];
    }

    [sector_hue(r, g, b, max, delta), saturation, max]
}

/// Convert HSV coordinates, with the hue in degrees and saturation and value
/// as fractions, to sRGB.
pub(crate) fn hsv_to_srgb(value: &[Float; 3]) -> [Float; 3] {
    let [h, s, v] = *value;

    if s <= 0.0 {
        return [v, v, v];
    }

    let h = wrap_hue(h) / 60.0;
    let sector = h.floor();
    let fraction = h - sector;

    let p = v * (1.0 - s);
    let q = v * s.mul_add(-fraction, 1.0);
    let t = v * s.mul_add(fraction - 1.0, 1.0);

    match sector as u8 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Compute the hue, in degrees, from the dominant RGB channel.
fn sector_hue(r: Float, g: Float, b: Float, max: Float, delta: Float) -> Float {
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    wrap_hue(h * 60.0)
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert sRGB coordinates to CMYK fractions in `0..=1`. The conversion is
/// the naive lossless one without any ICC profile modeling.
pub(crate) fn srgb_to_cmyk(value: &[Float; 3]) -> [Float; 4] {
    let [r, g, b] = *value;
    let k = 1.0 - r.max(g).max(b);

    if k >= 1.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }

    let white = 1.0 - k;
    [
        (white - r) / white,
        (white - g) / white,
        (white - b) / white,
        k,
    ]
}

/// Convert CMYK fractions to sRGB coordinates.
pub(crate) fn cmyk_to_srgb(value: &[Float; 4]) -> [Float; 3] {
    let [c, m, y, k] = *value;
    let white = 1.0 - k;
    [(1.0 - c) * white, (1.0 - m) * white, (1.0 - y) * white]
}

// ====================================================================================================================
