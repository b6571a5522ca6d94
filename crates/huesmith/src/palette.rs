use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Hsl, Oklch, Rgb};
use crate::core::parse;
use crate::error::ColorFormatError;
use crate::naming::nearest_name;

/// Parse a color from any supported textual format.
///
/// This function recognizes the same formats as [`ColorStop::parse`] but
/// reduces malformed input to an absent value, which is the preferred shape
/// at the edge of this crate. The underlying parse error is recorded as a
/// debug event before being dropped.
pub fn parse_color(s: &str) -> Option<Rgb> {
    match s.parse() {
        Ok(color) => Some(color),
        Err(error) => {
            debug!(input = s, %error, "failed to parse color");
            None
        }
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A palette color in its resolved, display-ready forms.
///
/// A color stop carries the same color as normalized hexadecimal text, as
/// 24-bit RGB, and as HSL, plus an optional alpha percentage. The three
/// representations are always derived together and hence cannot go out of
/// sync. An omitted alpha means fully opaque.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStop {
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<u8>,
}

impl ColorStop {
    /// Create a new, fully opaque color stop from the given color.
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            hex: rgb.to_string(),
            rgb,
            hsl: rgb.to_hsl(),
            alpha: None,
        }
    }

    /// Create a new, fully opaque color stop from the given Oklch color,
    /// gamut-mapping if necessary.
    pub fn from_oklch(color: &Oklch) -> Self {
        Self::from_rgb(color.to_rgb())
    }

    /// Parse a color stop from hashed hexadecimal or CSS functional notation.
    /// An eight-digit hexadecimal color or a fourth functional component
    /// yields the alpha percentage, with full opacity normalized to an absent
    /// alpha.
    pub fn parse(s: &str) -> Result<Self, ColorFormatError> {
        let ([r, g, b], alpha) = parse(s)?;
        let mut stop = Self::from_rgb(Rgb::new(r, g, b));
        stop.alpha = alpha.filter(|&a| a < 100);
        Ok(stop)
    }

    /// Create a new color stop with the given alpha percentage. Values of
    /// 100 or more mean fully opaque and normalize to an absent alpha.
    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = Some(alpha).filter(|&a| a < 100);
        self
    }

    /// Format this color stop in CSS `rgb()` notation.
    pub fn css_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.rgb.r, self.rgb.g, self.rgb.b)
    }

    /// Format this color stop in CSS `hsl()` notation with whole-number
    /// components.
    pub fn css_hsl(&self) -> String {
        self.hsl.to_string()
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A single editable slot of a palette.
///
/// The slot owns its color stop and the state the caller edits in place: the
/// lock excluding the slot from regeneration, an optional identifier, and an
/// optional user-assigned name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteSlot {
    pub stop: ColorStop,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PaletteSlot {
    /// Create a new, unlocked, unnamed slot for the given color stop.
    pub fn new(stop: ColorStop) -> Self {
        Self {
            stop,
            locked: false,
            id: None,
            name: None,
        }
    }

    /// Determine this slot's display name, which is the user-assigned name
    /// if there is one and the name of the closest named color otherwise.
    pub fn effective_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => nearest_name(&self.stop.rgb),
        }
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{parse_color, ColorStop, PaletteSlot};
    use crate::color::Rgb;
    use crate::error::ColorFormatError;

    #[test]
    fn test_color_stop_consistency() -> Result<(), ColorFormatError> {
        let stop = ColorStop::parse("  #3B82F6 ")?;
        assert_eq!(stop.hex, "#3b82f6");
        assert_eq!(stop.rgb, Rgb::new(59, 130, 246));
        assert_eq!(stop.hsl, stop.rgb.to_hsl());
        assert_eq!(stop.alpha, None);
        assert_eq!(stop.css_rgb(), "rgb(59, 130, 246)");
        assert_eq!(stop.css_hsl(), "hsl(217, 91%, 60%)");

        let same = ColorStop::parse("rgb(59, 130, 246)")?;
        assert_eq!(stop, same);

        Ok(())
    }

    #[test]
    fn test_alpha_normalization() -> Result<(), ColorFormatError> {
        assert_eq!(ColorStop::parse("#3b82f6cc")?.alpha, Some(80));
        assert_eq!(ColorStop::parse("#3b82f680")?.alpha, Some(50));
        assert_eq!(ColorStop::parse("#3b82f6ff")?.alpha, None);
        assert_eq!(ColorStop::parse("rgba(1, 2, 3, 1.0)")?.alpha, None);
        assert_eq!(ColorStop::parse("rgba(1, 2, 3, 0.25)")?.alpha, Some(25));

        let stop = ColorStop::from_rgb(Rgb::new(1, 2, 3));
        assert_eq!(stop.clone().with_alpha(100).alpha, None);
        assert_eq!(stop.with_alpha(33).alpha, Some(33));

        Ok(())
    }

    #[test]
    fn test_parse_failures() {
        assert!(ColorStop::parse("#12345").is_err());
        assert_eq!(parse_color("#3b82f6"), Some(Rgb::new(59, 130, 246)));
        assert_eq!(parse_color("definitely not a color"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn test_effective_name() {
        let mut slot = PaletteSlot::new(ColorStop::from_rgb(Rgb::new(255, 0, 0)));
        assert!(!slot.locked);
        assert_eq!(slot.effective_name(), "red");

        slot.name = Some("brand fire".to_string());
        assert_eq!(slot.effective_name(), "brand fire");
    }

    #[test]
    fn test_serialization() {
        let slot = PaletteSlot::new(ColorStop::from_rgb(Rgb::new(59, 130, 246)));
        let json = serde_json::to_string(&slot).unwrap();
        assert!(json.contains("\"hex\":\"#3b82f6\""));
        assert!(!json.contains("alpha"));
        assert!(!json.contains("\"name\""));

        let round_trip: PaletteSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(round_trip, slot);

        let translucent = ColorStop::from_rgb(Rgb::new(0, 0, 0)).with_alpha(50);
        let json = serde_json::to_string(&translucent).unwrap();
        assert!(json.contains("\"alpha\":50"));
    }
}
