use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{
    cmyk_to_srgb, delta_e_ok, from_24bit, hsl_to_srgb, hsv_to_srgb, interpolate_hue, luminance,
    oklab_to_oklch, oklch_to_gamut, oklch_to_oklab, parse, srgb_to_cmyk, srgb_to_hsl, srgb_to_hsv,
    srgb_to_oklab, to_24bit, to_eq_bits, to_eq_hue_bits, wrap_hue, ACHROMATIC_CHROMA,
};
use crate::error::ColorFormatError;
use crate::Float;

/// The chroma above which an Oklch color counts as wide-gamut, i.e., as
/// unlikely to be displayable in sRGB.
const WIDE_GAMUT_CHROMA: Float = 0.25;

/// The multiplier and ceiling for the illustrative Display P3 chroma
/// expansion.
const P3_CHROMA_EXPANSION: Float = 1.12;
const P3_CHROMA_CEILING: Float = 0.37;

// ====================================================================================================================

/// A 24-bit RGB color.
///
/// This is the canonical interchange representation. All other color
/// representations convert to and from it, and the naming index and the
/// quantizer consume it directly. Out-of-gamut colors cannot be represented;
/// conversions from the Oklab variations gamut-map first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color from the given channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a new RGB color from the `0xRRGGBB` bit pattern. The highest
    /// byte is ignored.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            r: ((bits >> 16) & 0xff) as u8,
            g: ((bits >> 8) & 0xff) as u8,
            b: (bits & 0xff) as u8,
        }
    }

    /// Pack this color into the `0xRRGGBB` bit pattern.
    pub const fn to_bits(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Determine the WCAG relative luminance of this color, a fraction in
    /// `0..=1`.
    pub fn luminance(&self) -> Float {
        luminance(&from_24bit(self.r, self.g, self.b))
    }

    /// Convert this color to HSL.
    pub fn to_hsl(&self) -> Hsl {
        let [h, s, l] = srgb_to_hsl(&from_24bit(self.r, self.g, self.b));
        Hsl {
            h,
            s: s * 100.0,
            l: l * 100.0,
        }
    }

    /// Convert this color to HSV.
    pub fn to_hsv(&self) -> Hsv {
        let [h, s, v] = srgb_to_hsv(&from_24bit(self.r, self.g, self.b));
        Hsv {
            h,
            s: s * 100.0,
            v: v * 100.0,
        }
    }

    /// Convert this color to CMYK.
    pub fn to_cmyk(&self) -> Cmyk {
        let [c, m, y, k] = srgb_to_cmyk(&from_24bit(self.r, self.g, self.b));
        Cmyk {
            c: c * 100.0,
            m: m * 100.0,
            y: y * 100.0,
            k: k * 100.0,
        }
    }

    /// Convert this color to Oklab.
    pub fn to_oklab(&self) -> Oklab {
        let [l, a, b] = srgb_to_oklab(&from_24bit(self.r, self.g, self.b));
        Oklab { l, a, b }
    }

    /// Convert this color to Oklch.
    pub fn to_oklch(&self) -> Oklch {
        let [l, c, h] = oklab_to_oklch(&srgb_to_oklab(&from_24bit(self.r, self.g, self.b)));
        Oklch { l, c, h }
    }
}

impl Display for Rgb {
    /// Format this color as a hashed, lowercase hexadecimal string.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorFormatError;

    /// Parse a color from hashed hexadecimal or CSS `rgb()`/`hsl()`
    /// functional notation. If the text carries an alpha component, it is
    /// dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).map(|([r, g, b], _)| Self { r, g, b })
    }
}

// ====================================================================================================================

/// A color in the HSL cylinder, with the hue in degrees and saturation and
/// lightness as percentages.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Hsl {
    pub h: Float,
    pub s: Float,
    pub l: Float,
}

impl Hsl {
    /// Create a new HSL color. The hue wraps into `0..360`; saturation and
    /// lightness are clamped into `0..=100`.
    pub fn new(h: Float, s: Float, l: Float) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// Convert this color to RGB.
    pub fn to_rgb(&self) -> Rgb {
        let [r, g, b] = to_24bit(&hsl_to_srgb(&[
            self.h,
            (self.s / 100.0).clamp(0.0, 1.0),
            (self.l / 100.0).clamp(0.0, 1.0),
        ]));
        Rgb { r, g, b }
    }
}

impl Display for Hsl {
    /// Format this color in CSS functional notation with whole-number
    /// components.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.h.round(),
            self.s.round(),
            self.l.round()
        )
    }
}

impl PartialEq for Hsl {
    fn eq(&self, other: &Self) -> bool {
        to_eq_hue_bits(self.h) == to_eq_hue_bits(other.h)
            && to_eq_bits(self.s / 100.0) == to_eq_bits(other.s / 100.0)
            && to_eq_bits(self.l / 100.0) == to_eq_bits(other.l / 100.0)
    }
}

impl Eq for Hsl {}

// --------------------------------------------------------------------------------------------------------------------

/// A color in the HSV cylinder, with the hue in degrees and saturation and
/// value as percentages.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Hsv {
    pub h: Float,
    pub s: Float,
    pub v: Float,
}

impl Hsv {
    /// Create a new HSV color. The hue wraps into `0..360`; saturation and
    /// value are clamped into `0..=100`.
    pub fn new(h: Float, s: Float, v: Float) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 100.0),
            v: v.clamp(0.0, 100.0),
        }
    }

    /// Convert this color to RGB.
    pub fn to_rgb(&self) -> Rgb {
        let [r, g, b] = to_24bit(&hsv_to_srgb(&[
            self.h,
            (self.s / 100.0).clamp(0.0, 1.0),
            (self.v / 100.0).clamp(0.0, 1.0),
        ]));
        Rgb { r, g, b }
    }
}

impl Display for Hsv {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsv({}, {}%, {}%)",
            self.h.round(),
            self.s.round(),
            self.v.round()
        )
    }
}

impl PartialEq for Hsv {
    fn eq(&self, other: &Self) -> bool {
        to_eq_hue_bits(self.h) == to_eq_hue_bits(other.h)
            && to_eq_bits(self.s / 100.0) == to_eq_bits(other.s / 100.0)
            && to_eq_bits(self.v / 100.0) == to_eq_bits(other.v / 100.0)
    }
}

impl Eq for Hsv {}

// --------------------------------------------------------------------------------------------------------------------

/// A color in the naive CMYK model, with all four channels as percentages.
/// The conversion from RGB is lossless and does not model ICC profiles.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: Float,
    pub m: Float,
    pub y: Float,
    pub k: Float,
}

impl Cmyk {
    /// Create a new CMYK color, clamping all channels into `0..=100`.
    pub fn new(c: Float, m: Float, y: Float, k: Float) -> Self {
        Self {
            c: c.clamp(0.0, 100.0),
            m: m.clamp(0.0, 100.0),
            y: y.clamp(0.0, 100.0),
            k: k.clamp(0.0, 100.0),
        }
    }

    /// Convert this color to RGB.
    pub fn to_rgb(&self) -> Rgb {
        let [r, g, b] = to_24bit(&cmyk_to_srgb(&[
            (self.c / 100.0).clamp(0.0, 1.0),
            (self.m / 100.0).clamp(0.0, 1.0),
            (self.y / 100.0).clamp(0.0, 1.0),
            (self.k / 100.0).clamp(0.0, 1.0),
        ]));
        Rgb { r, g, b }
    }
}

impl Display for Cmyk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cmyk({}%, {}%, {}%, {}%)",
            self.c.round(),
            self.m.round(),
            self.y.round(),
            self.k.round()
        )
    }
}

impl PartialEq for Cmyk {
    fn eq(&self, other: &Self) -> bool {
        to_eq_bits(self.c / 100.0) == to_eq_bits(other.c / 100.0)
            && to_eq_bits(self.m / 100.0) == to_eq_bits(other.m / 100.0)
            && to_eq_bits(self.y / 100.0) == to_eq_bits(other.y / 100.0)
            && to_eq_bits(self.k / 100.0) == to_eq_bits(other.k / 100.0)
    }
}

impl Eq for Cmyk {}

// ====================================================================================================================

/// A color in the perceptually uniform Oklab space.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Oklab {
    pub l: Float,
    pub a: Float,
    pub b: Float,
}

impl Oklab {
    /// Create a new Oklab color, clamping the lightness into `0..=1`. The a
    /// and b coordinates are small signed fractions and pass through as is.
    pub fn new(l: Float, a: Float, b: Float) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            a,
            b,
        }
    }

    /// Convert this color to its polar form.
    pub fn to_oklch(&self) -> Oklch {
        let [l, c, h] = oklab_to_oklch(&[self.l, self.a, self.b]);
        Oklch { l, c, h }
    }

    /// Convert this color to RGB, gamut-mapping if it is not displayable in
    /// sRGB.
    pub fn to_rgb(&self) -> Rgb {
        self.to_oklch().to_rgb()
    }

    /// Determine the difference between this and the given color as the
    /// Euclidean distance of their coordinates, also called Delta-E-OK.
    pub fn difference(&self, other: &Oklab) -> Float {
        delta_e_ok(&[self.l, self.a, self.b], &[other.l, other.a, other.b])
    }
}

impl PartialEq for Oklab {
    fn eq(&self, other: &Self) -> bool {
        to_eq_bits(self.l) == to_eq_bits(other.l)
            && to_eq_bits(self.a) == to_eq_bits(other.a)
            && to_eq_bits(self.b) == to_eq_bits(other.b)
    }
}

impl Eq for Oklab {}

// --------------------------------------------------------------------------------------------------------------------

/// A color in Oklch, the polar form of Oklab.
///
/// Oklch is the working space for palette generation. Lightness and chroma
/// can be adjusted independently of the hue, which makes the harmony and
/// theme algorithms straightforward rotations and clamps.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Oklch {
    pub l: Float,
    pub c: Float,
    pub h: Float,
}

impl Oklch {
    /// Create a new Oklch color. The lightness is clamped into `0..=1`, the
    /// chroma to be non-negative, and the hue wraps into `0..360`.
    pub fn new(l: Float, c: Float, h: Float) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            c: c.max(0.0),
            h: wrap_hue(h),
        }
    }

    /// Convert this color to its rectangular form.
    pub fn to_oklab(&self) -> Oklab {
        let [l, a, b] = oklch_to_oklab(&[self.l, self.c, self.h]);
        Oklab { l, a, b }
    }

    /// Convert this color to RGB.
    ///
    /// If the color is not displayable in sRGB, this method maps it into
    /// gamut first by reducing chroma while holding lightness and hue, so
    /// the result is always a faithful, displayable stand-in.
    pub fn to_rgb(&self) -> Rgb {
        let [r, g, b] = to_24bit(&oklch_to_gamut(&[self.l, self.c, self.h]));
        Rgb { r, g, b }
    }

    /// Determine whether this color is achromatic, i.e., has too little
    /// chroma for its hue to be meaningful.
    pub fn is_achromatic(&self) -> bool {
        self.c <= ACHROMATIC_CHROMA
    }

    /// Determine whether this color's chroma is high enough to suggest a
    /// wide-gamut color, i.e., one unlikely to be displayable in sRGB.
    pub fn is_wide_gamut(&self) -> bool {
        self.c > WIDE_GAMUT_CHROMA
    }

    /// Expand this color towards Display P3 by raising its chroma by a fixed
    /// multiplier, capped at a fixed ceiling. The result is illustrative, not
    /// colorimetrically exact.
    pub fn expand_to_p3(&self) -> Oklch {
        Oklch {
            c: (self.c * P3_CHROMA_EXPANSION).min(P3_CHROMA_CEILING),
            ..*self
        }
    }

    /// Create a new color with this color's chroma and hue but the given
    /// lightness, clamped into `0..=1`.
    pub fn with_lightness(&self, l: Float) -> Oklch {
        Oklch {
            l: l.clamp(0.0, 1.0),
            ..*self
        }
    }

    /// Create a new color with this color's lightness and hue but the given
    /// non-negative chroma.
    pub fn with_chroma(&self, c: Float) -> Oklch {
        Oklch { c: c.max(0.0), ..*self }
    }

    /// Create a new color with this color's lightness and chroma but the
    /// given hue, wrapped into `0..360`.
    pub fn with_hue(&self, h: Float) -> Oklch {
        Oklch {
            h: wrap_hue(h),
            ..*self
        }
    }

    /// Move this color's lightness towards white by the given fraction of
    /// the remaining headroom.
    pub fn lighten(&self, fraction: Float) -> Oklch {
        let fraction = fraction.clamp(0.0, 1.0);
        self.with_lightness((1.0 - self.l).mul_add(fraction, self.l))
    }

    /// Scale this color's lightness towards black by the given fraction.
    pub fn darken(&self, fraction: Float) -> Oklch {
        let fraction = fraction.clamp(0.0, 1.0);
        self.with_lightness(self.l * (1.0 - fraction))
    }

    /// Mix this color with the given color, interpolating lightness and
    /// chroma linearly and the hue along the shorter arc. The fraction is
    /// clamped into `0..=1`, with 0 yielding this color and 1 the other. If
    /// either endpoint is achromatic, the other endpoint's hue carries
    /// through unchanged.
    pub fn mix(&self, other: &Oklch, fraction: Float) -> Oklch {
        let fraction = fraction.clamp(0.0, 1.0);
        let h = if self.is_achromatic() {
            other.h
        } else if other.is_achromatic() {
            self.h
        } else {
            interpolate_hue(self.h, other.h, fraction)
        };

        Oklch {
            l: (other.l - self.l).mul_add(fraction, self.l),
            c: (other.c - self.c).mul_add(fraction, self.c),
            h,
        }
    }
}

impl Display for Oklch {
    /// Format this color in CSS functional notation.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.5} {:.5} {:.2})", self.l, self.c, self.h)
    }
}

impl PartialEq for Oklch {
    fn eq(&self, other: &Self) -> bool {
        to_eq_bits(self.l) == to_eq_bits(other.l)
            && to_eq_bits(self.c) == to_eq_bits(other.c)
            && to_eq_hue_bits(self.h) == to_eq_hue_bits(other.h)
    }
}

impl Eq for Oklch {}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{Cmyk, Hsl, Oklch, Rgb};
    use crate::assert_close_enough;
    use crate::error::ColorFormatError;

    #[test]
    fn test_rgb_bits() {
        let blue = Rgb::from_bits(0x3b82f6);
        assert_eq!(blue, Rgb::new(0x3b, 0x82, 0xf6));
        assert_eq!(blue.to_bits(), 0x3b82f6);
        assert_eq!(Rgb::from_bits(0xff00_0000).to_bits(), 0);
    }

    #[test]
    fn test_rgb_parse_and_display() -> Result<(), ColorFormatError> {
        let blue: Rgb = "#3B82F6".parse()?;
        assert_eq!(blue, Rgb::new(59, 130, 246));
        assert_eq!(blue.to_string(), "#3b82f6");

        let red: Rgb = "rgb(255, 0, 0)".parse()?;
        assert_eq!(red, Rgb::new(255, 0, 0));

        assert!("midnight".parse::<Rgb>().is_err());

        Ok(())
    }

    #[test]
    fn test_cylinder_round_trips() {
        let blue = Rgb::new(59, 130, 246);

        let hsl = blue.to_hsl();
        assert!((hsl.h - 217.21925133689842).abs() < 1e-9);
        assert!((hsl.s - 91.21951219512198).abs() < 1e-7);
        assert!((hsl.l - 59.80392156862745).abs() < 1e-7);
        assert_eq!(hsl.to_rgb(), blue);
        assert_eq!(hsl.to_string(), "hsl(217, 91%, 60%)");

        let hsv = blue.to_hsv();
        assert!((hsv.v - 96.47058823529412).abs() < 1e-7);
        assert_eq!(hsv.to_rgb(), blue);
        assert_eq!(hsv.to_string(), "hsv(217, 76%, 96%)");

        let cmyk = blue.to_cmyk();
        assert!((cmyk.c - 76.01626016260163).abs() < 1e-7);
        assert_eq!(cmyk.to_rgb(), blue);
        assert_eq!(cmyk.to_string(), "cmyk(76%, 47%, 0%, 4%)");
    }

    #[test]
    fn test_constructors_normalize() {
        let hsl = Hsl::new(-30.0, 150.0, -2.0);
        assert_eq!(hsl.h, 330.0);
        assert_eq!(hsl.s, 100.0);
        assert_eq!(hsl.l, 0.0);

        let cmyk = Cmyk::new(120.0, -5.0, 50.0, 200.0);
        assert_eq!(cmyk.c, 100.0);
        assert_eq!(cmyk.m, 0.0);
        assert_eq!(cmyk.k, 100.0);

        let oklch = Oklch::new(1.7, -0.2, 420.0);
        assert_eq!(oklch.l, 1.0);
        assert_eq!(oklch.c, 0.0);
        assert_eq!(oklch.h, 60.0);
    }

    #[test]
    fn test_oklab_oklch() {
        let blue = Rgb::new(59, 130, 246);

        let oklab = blue.to_oklab();
        assert!((oklab.l - 0.6230830295087604).abs() < 1e-9);
        assert!((oklab.a - -0.03324761983477509).abs() < 1e-9);
        assert!((oklab.b - -0.18505168929576454).abs() < 1e-9);

        let oklch = blue.to_oklch();
        assert!((oklch.c - 0.18801471201981484).abs() < 1e-9);
        assert!((oklch.h - 259.8145266738871).abs() < 1e-6);
        assert_eq!(oklch, oklab.to_oklch());
        assert_eq!(oklch.to_string(), "oklch(0.62308 0.18801 259.81)");

        // In-gamut colors survive the round trip exactly.
        assert_eq!(oklab.to_rgb(), blue);
        assert_eq!(oklch.to_rgb(), blue);

        // Out-of-gamut colors map to their displayable stand-in.
        let vivid = Oklch::new(0.63, 0.45, 29.0);
        assert_eq!(vivid.to_rgb(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_difference() {
        let red = Rgb::new(255, 0, 0).to_oklab();
        let blue = Rgb::new(59, 130, 246).to_oklab();
        assert_close_enough!(red.difference(&red), 0.0);
        assert!(red.difference(&blue) > 0.3);
        assert_close_enough!(red.difference(&blue), blue.difference(&red));
    }

    #[test]
    fn test_achromatic_and_wide_gamut() {
        let gray = Rgb::new(204, 204, 204).to_oklch();
        assert!(gray.is_achromatic());
        assert!(!gray.is_wide_gamut());

        let vivid = Oklch::new(0.63, 0.3, 29.0);
        assert!(vivid.is_wide_gamut());

        let expanded = vivid.expand_to_p3();
        assert!((expanded.c - 0.336).abs() < 1e-9);
        assert_eq!(Oklch::new(0.63, 0.36, 29.0).expand_to_p3().c, 0.37);
    }

    #[test]
    fn test_lightness_adjustment() {
        let base = Oklch::new(0.5, 0.1, 200.0);
        assert_close_enough!(base.lighten(0.5).l, 0.75);
        assert_close_enough!(base.darken(0.5).l, 0.25);
        assert_close_enough!(base.lighten(1.0).l, 1.0);
        assert_close_enough!(base.darken(1.0).l, 0.0);
        assert_close_enough!(base.with_lightness(2.0).l, 1.0);
    }

    #[test]
    fn test_mix() {
        let plum = Oklch::new(0.6, 0.2, 350.0);
        let coral = Oklch::new(0.4, 0.1, 10.0);

        let mid = plum.mix(&coral, 0.5);
        assert_close_enough!(mid.l, 0.5);
        assert_close_enough!(mid.c, 0.15);
        assert_close_enough!(mid.h, 0.0);

        // Achromatic endpoints do not drag the hue towards zero.
        let gray = Oklch::new(0.8, 0.0, 0.0);
        let blue = Oklch::new(0.4, 0.2, 250.0);
        let tinted = gray.mix(&blue, 0.25);
        assert_close_enough!(tinted.h, 250.0);
        assert_close_enough!(tinted.c, 0.05);
    }
}
