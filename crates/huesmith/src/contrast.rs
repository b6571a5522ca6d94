use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Rgb;
use crate::core::{contrast_ratio_of_luminance, from_24bit, to_contrast, to_contrast_luminance};
use crate::palette::ColorStop;
use crate::Float;

/// The contrast ratio a fix must reach, which is WCAG AA for body text.
pub(crate) const TARGET_RATIO: Float = 4.5;

/// The lightness endpoints the fix search may move towards.
const LIGHT_ENDPOINT: Float = 0.98;
const DARK_ENDPOINT: Float = 0.02;

// ====================================================================================================================

/// The WCAG 2.1 conformance level of a contrast ratio.
///
/// Levels are ordered, with [`WcagLevel::Fail`] the smallest. AA for large
/// text requires a ratio of at least 3, AA at least 4.5, and AAA at least 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WcagLevel {
    Fail,
    AaLarge,
    Aa,
    Aaa,
}

impl WcagLevel {
    /// Classify the given contrast ratio.
    pub fn from_ratio(ratio: Float) -> Self {
        if ratio >= 7.0 {
            Self::Aaa
        } else if ratio >= 4.5 {
            Self::Aa
        } else if ratio >= 3.0 {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }
}

impl Display for WcagLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fail => "Fail",
            Self::AaLarge => "AA Large",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        })
    }
}

/// The APCA readability level of a lightness contrast Lc.
///
/// Levels are ordered by the magnitude of Lc: at least 30 suffices for
/// non-text UI elements, 45 for large text, 60 for body text, and 75 for
/// body text at preferred reading sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApcaLevel {
    Fail,
    Ui,
    Large,
    Body,
    Preferred,
}

impl ApcaLevel {
    /// Classify the given lightness contrast Lc by its magnitude.
    pub fn from_lc(lc: Float) -> Self {
        let magnitude = lc.abs();
        if magnitude >= 75.0 {
            Self::Preferred
        } else if magnitude >= 60.0 {
            Self::Body
        } else if magnitude >= 45.0 {
            Self::Large
        } else if magnitude >= 30.0 {
            Self::Ui
        } else {
            Self::Fail
        }
    }
}

impl Display for ApcaLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fail => "Fail",
            Self::Ui => "UI",
            Self::Large => "Large",
            Self::Body => "Body",
            Self::Preferred => "Preferred",
        })
    }
}

// ====================================================================================================================

/// Compute the WCAG 2.1 contrast ratio between the two colors.
///
/// The ratio is symmetric in its arguments and ranges from 1 for identical
/// colors to 21 for black and white.
pub fn contrast_ratio(color1: &Rgb, color2: &Rgb) -> Float {
    contrast_ratio_of_luminance(color1.luminance(), color2.luminance())
}

/// Compute the APCA lightness contrast Lc for text on a background.
///
/// Unlike the WCAG ratio, APCA is signed and asymmetric: positive values
/// describe dark text on a light background, negative values light text on a
/// dark background, with magnitudes reaching roughly 106 and 108. This
/// implementation uses the simplified approximation that omits ambient light
/// and flare terms.
pub fn apca_contrast(text: &Rgb, background: &Rgb) -> Float {
    100.0
        * to_contrast(
            to_contrast_luminance(&from_24bit(text.r, text.g, text.b)),
            to_contrast_luminance(&from_24bit(background.r, background.g, background.b)),
        )
}

// --------------------------------------------------------------------------------------------------------------------

/// The direction a contrast fix moved the foreground's lightness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixDirection {
    Lighten,
    Darken,
}

/// A replacement foreground color that reaches WCAG AA.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContrastFix {
    /// The replacement color, with hue and chroma preserved as far as the
    /// gamut allows.
    pub stop: ColorStop,
    /// Whether the replacement is lighter or darker than the original.
    pub direction: FixDirection,
    /// The contrast ratio the replacement achieves against the background.
    pub ratio: Float,
}

/// Suggest a minimal lightness adjustment that makes the foreground readable
/// on the background.
///
/// If the pair already reaches WCAG AA, there is nothing to fix and the
/// result is `None`. Otherwise this function searches the foreground's Oklch
/// lightness, holding hue and chroma, for the value closest to the original
/// that reaches a ratio of 4.5. It first probes a light and a dark endpoint
/// and commits to the more contrasting direction, then bisects between the
/// failing original and the passing endpoint. Every probe is evaluated on
/// the quantized RGB color, so the returned ratio is exact for the returned
/// color. If neither endpoint reaches the target, no adjustment of lightness
/// alone can help and the result is `None`.
pub fn suggest_contrast_fix(foreground: &Rgb, background: &Rgb) -> Option<ContrastFix> {
    if contrast_ratio(foreground, background) >= TARGET_RATIO {
        return None;
    }

    let base = foreground.to_oklch();
    let ratio_at =
        |lightness: Float| contrast_ratio(&base.with_lightness(lightness).to_rgb(), background);

    let light_ratio = ratio_at(LIGHT_ENDPOINT);
    let dark_ratio = ratio_at(DARK_ENDPOINT);
    let (endpoint, direction) = if light_ratio >= dark_ratio {
        (LIGHT_ENDPOINT, FixDirection::Lighten)
    } else {
        (DARK_ENDPOINT, FixDirection::Darken)
    };
    if light_ratio < TARGET_RATIO && dark_ratio < TARGET_RATIO {
        debug!(light_ratio, dark_ratio, "no lightness-only contrast fix");
        return None;
    }

    // Bisect with one bound passing and the other failing throughout.
    let mut passing = endpoint;
    let mut failing = base.l;
    for _ in 0..24 {
        let midpoint = 0.5 * (passing + failing);
        if ratio_at(midpoint) >= TARGET_RATIO {
            passing = midpoint;
        } else {
            failing = midpoint;
        }
    }

    let fixed = base.with_lightness(passing).to_rgb();
    Some(ContrastFix {
        stop: ColorStop::from_rgb(fixed),
        direction,
        ratio: contrast_ratio(&fixed, background),
    })
}

// ====================================================================================================================
