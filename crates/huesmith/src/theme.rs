use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Oklch, Rgb};
use crate::contrast::{contrast_ratio, TARGET_RATIO};
use crate::palette::{ColorStop, PaletteSlot};
use crate::Float;

/// The surface lightness tiers, from page background to popover. Light mode
/// darkens as elevation increases, dark mode lightens instead.
const LIGHT_SURFACE_L: [Float; 5] = [0.985, 0.968, 0.952, 0.938, 0.922];
const DARK_SURFACE_L: [Float; 5] = [0.145, 0.17, 0.195, 0.22, 0.245];

const SURFACE_TIERS: [(&str, &str); 5] = [
    ("background", "Page background"),
    ("surface-subtle", "Slightly elevated background for grouped content"),
    ("card", "Card and panel background"),
    ("card-raised", "Raised card background"),
    ("popover", "Popover and menu background"),
];

/// The hue of the destructive token family.
const DESTRUCTIVE_HUE: Float = 27.0;

// ====================================================================================================================

/// A semantic theme token with one value per mode and a short human
/// description of its intended use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeToken {
    pub name: String,
    pub description: String,
    pub light: ColorStop,
    pub dark: ColorStop,
}

impl ThemeToken {
    fn new(name: &str, description: &str, light: &Oklch, dark: &Oklch) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            light: ColorStop::from_oklch(light),
            dark: ColorStop::from_oklch(dark),
        }
    }
}

/// A utility color role. These cover the states an interface signals
/// independently of its palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UtilityRole {
    Info,
    Success,
    Warning,
    Error,
    Neutral,
    Focus,
}

impl UtilityRole {
    pub const ALL: [UtilityRole; 6] = [
        UtilityRole::Info,
        UtilityRole::Success,
        UtilityRole::Warning,
        UtilityRole::Error,
        UtilityRole::Neutral,
        UtilityRole::Focus,
    ];
}

/// A caller-provided base color for a utility role. Roles without an entry
/// fall back to stock bases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityColorSet {
    pub role: UtilityRole,
    pub base: Rgb,
}

/// The derived per-mode values of a utility role. The main tones carry the
/// role's signal color and the subtle tones are a pale wash of the same hue
/// for tinted banner and badge backgrounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityTones {
    pub role: UtilityRole,
    pub light: ColorStop,
    pub dark: ColorStop,
    pub subtle_light: ColorStop,
    pub subtle_dark: ColorStop,
}

/// The complete set of theme tokens derived from a palette. Every token
/// carries both a light and a dark value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeTokenSet {
    pub tokens: Vec<ThemeToken>,
    pub utility: Vec<UtilityTones>,
    pub palette: Vec<ColorStop>,
}

impl ThemeTokenSet {
    /// Look up a semantic token by name.
    pub fn token(&self, name: &str) -> Option<&ThemeToken> {
        self.tokens.iter().find(|token| token.name == name)
    }

    /// Look up the tones of a utility role.
    pub fn utility(&self, role: UtilityRole) -> Option<&UtilityTones> {
        self.utility.iter().find(|tones| tones.role == role)
    }
}

// ====================================================================================================================

/// Pick the primary, secondary, and accent source colors from the palette.
///
/// The highest-chroma slot becomes primary and the runners-up fill the other
/// roles, with ties resolving to input order. Missing slots are synthesized
/// by rotating the primary hue, and an empty palette falls back to a calm
/// mid-lightness blue.
fn select_roles(slots: &[PaletteSlot]) -> (Oklch, Oklch, Oklch) {
    let mut colors: Vec<Oklch> = slots.iter().map(|slot| slot.stop.rgb.to_oklch()).collect();
    colors.sort_by(|color1, color2| {
        color2
            .c
            .partial_cmp(&color1.c)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let primary = colors
        .first()
        .copied()
        .unwrap_or_else(|| Oklch::new(0.55, 0.12, 250.0));
    let secondary = colors
        .get(1)
        .copied()
        .unwrap_or_else(|| Oklch::new(primary.l, primary.c * 0.6, primary.h + 30.0));
    let accent = colors
        .get(2)
        .copied()
        .unwrap_or_else(|| Oklch::new(primary.l, (primary.c * 0.5).max(0.04), primary.h + 180.0));

    (primary, secondary, accent)
}

/// Darken or lighten a surface until the foreground reads on it, moving away
/// from the foreground's own lightness. Bounded, best-effort.
fn nudge_for_contrast(color: &Oklch, foreground: &Rgb) -> Oklch {
    let darken = foreground.luminance() > 0.18;
    let mut nudged = *color;
    for _ in 0..12 {
        if contrast_ratio(foreground, &nudged.to_rgb()) >= TARGET_RATIO {
            break;
        }
        nudged = if darken {
            nudged.with_lightness((nudged.l - 0.025).max(0.0))
        } else {
            nudged.with_lightness((nudged.l + 0.025).min(1.0))
        };
    }
    nudged
}

/// Push a colored token and its near-neutral foreground token. The light
/// mode surface carries near-white text, the dark mode surface near-black
/// text, and both surfaces are nudged until that pairing is legible.
fn push_colored_pair(
    tokens: &mut Vec<ThemeToken>,
    name: &str,
    description: &str,
    light: &Oklch,
    dark: &Oklch,
    tint: Float,
) {
    let light_foreground = Oklch::new(0.985, tint, light.h);
    let dark_foreground = Oklch::new(0.16, tint, dark.h);

    let light = nudge_for_contrast(light, &light_foreground.to_rgb());
    let dark = nudge_for_contrast(dark, &dark_foreground.to_rgb());

    tokens.push(ThemeToken::new(name, description, &light, &dark));
    tokens.push(ThemeToken::new(
        &format!("{}-foreground", name),
        &format!("Text and icons on the {} color", name),
        &light_foreground,
        &dark_foreground,
    ));
}

/// The stock base color for a utility role without a caller-provided base.
/// Neutral and focus lean on the palette so they match its character.
fn default_utility_base(role: UtilityRole, primary: &Oklch, tint: Float) -> Oklch {
    match role {
        UtilityRole::Info => Oklch::new(0.62, 0.15, 245.0),
        UtilityRole::Success => Oklch::new(0.64, 0.15, 150.0),
        UtilityRole::Warning => Oklch::new(0.75, 0.15, 85.0),
        UtilityRole::Error => Oklch::new(0.58, 0.19, DESTRUCTIVE_HUE),
        UtilityRole::Neutral => Oklch::new(0.55, (tint * 2.0).min(0.03), primary.h),
        UtilityRole::Focus => Oklch::new(0.60, primary.c.clamp(0.10, 0.22), primary.h),
    }
}

/// The per-role target lightness for light and dark mode. Warning keeps
/// more of its brightness than the other roles because yellow already reads
/// as bright.
fn utility_lightness(role: UtilityRole) -> (Float, Float) {
    match role {
        UtilityRole::Info => (0.55, 0.68),
        UtilityRole::Success => (0.56, 0.68),
        UtilityRole::Warning => (0.68, 0.78),
        UtilityRole::Error => (0.55, 0.66),
        UtilityRole::Neutral => (0.50, 0.70),
        UtilityRole::Focus => (0.55, 0.70),
    }
}

// ====================================================================================================================

/// Derive the full theme token set from a palette.
///
/// The highest-chroma slot drives the theme: its hue becomes the dominant
/// hue and a whisper of its chroma, the tint chroma, tints every neutral
/// surface so the theme never degrades to flat gray. Five surface tiers per
/// mode implement tonal elevation. The colored token families use distinct
/// lightness and chroma windows per mode, paired with near-neutral
/// foregrounds that are nudged into legibility. Utility roles derive from
/// the caller's bases where provided and from stock bases otherwise.
///
/// Degenerate input is never an error: an empty palette produces a complete
/// token set around a fallback primary.
pub fn derive_theme(slots: &[PaletteSlot], utilities: &[UtilityColorSet]) -> ThemeTokenSet {
    let (primary, secondary, accent) = select_roles(slots);
    let hue = primary.h;
    let tint = (primary.c * 0.055).clamp(0.005, 0.015);
    debug!(
        slots = slots.len(),
        dominant_hue = hue,
        "deriving theme tokens"
    );

    let mut tokens = Vec::with_capacity(18);
    for (index, (name, description)) in SURFACE_TIERS.iter().enumerate() {
        tokens.push(ThemeToken::new(
            name,
            description,
            &Oklch::new(LIGHT_SURFACE_L[index], tint, hue),
            &Oklch::new(DARK_SURFACE_L[index], tint, hue),
        ));
    }
    tokens.push(ThemeToken::new(
        "foreground",
        "Default text and icon color",
        &Oklch::new(0.17, tint, hue),
        &Oklch::new(0.93, tint, hue),
    ));
    tokens.push(ThemeToken::new(
        "border",
        "Hairline borders and dividers",
        &Oklch::new(0.88, (tint * 2.0).min(0.025), hue),
        &Oklch::new(0.30, (tint * 2.0).min(0.025), hue),
    ));

    push_colored_pair(
        &mut tokens,
        "primary",
        "Main brand color for interactive elements",
        &Oklch::new(primary.l.clamp(0.30, 0.38), primary.c.clamp(0.08, 0.23), hue),
        &Oklch::new(
            primary.l.clamp(0.66, 0.76),
            (primary.c * 0.95).clamp(0.07, 0.21),
            hue,
        ),
        tint,
    );
    tokens.push(ThemeToken::new(
        "primary-container",
        "Tinted fill behind prominent primary content",
        &Oklch::new(0.90, (primary.c * 0.3).clamp(0.03, 0.08), hue),
        &Oklch::new(0.32, (primary.c * 0.35).clamp(0.04, 0.10), hue),
    ));
    push_colored_pair(
        &mut tokens,
        "secondary",
        "Supporting color for less prominent elements",
        &Oklch::new(
            secondary.l.clamp(0.45, 0.55),
            (secondary.c * 0.8).clamp(0.05, 0.15),
            secondary.h,
        ),
        &Oklch::new(
            secondary.l.clamp(0.62, 0.72),
            (secondary.c * 0.8).clamp(0.05, 0.15),
            secondary.h,
        ),
        tint,
    );
    push_colored_pair(
        &mut tokens,
        "accent",
        "Highlight color for badges and focal points",
        &Oklch::new(accent.l.clamp(0.45, 0.55), accent.c.clamp(0.06, 0.16), accent.h),
        &Oklch::new(accent.l.clamp(0.64, 0.74), accent.c.clamp(0.06, 0.16), accent.h),
        tint,
    );
    push_colored_pair(
        &mut tokens,
        "destructive",
        "Dangerous and irreversible actions",
        &Oklch::new(0.52, 0.19, DESTRUCTIVE_HUE),
        &Oklch::new(0.64, 0.19, DESTRUCTIVE_HUE),
        tint,
    );

    let utility = UtilityRole::ALL
        .iter()
        .map(|&role| {
            let base = utilities
                .iter()
                .find(|set| set.role == role)
                .map_or_else(
                    || default_utility_base(role, &primary, tint),
                    |set| set.base.to_oklch(),
                );
            let (light_l, dark_l) = utility_lightness(role);
            UtilityTones {
                role,
                light: ColorStop::from_oklch(&Oklch::new(
                    light_l,
                    base.c.clamp(0.03, 0.23),
                    base.h,
                )),
                dark: ColorStop::from_oklch(&Oklch::new(
                    dark_l,
                    (base.c * 0.9).clamp(0.03, 0.21),
                    base.h,
                )),
                subtle_light: ColorStop::from_oklch(&Oklch::new(
                    0.94,
                    (base.c * 0.25).clamp(0.02, 0.07),
                    base.h,
                )),
                subtle_dark: ColorStop::from_oklch(&Oklch::new(
                    0.27,
                    (base.c * 0.3).clamp(0.03, 0.08),
                    base.h,
                )),
            }
        })
        .collect();

    ThemeTokenSet {
        tokens,
        utility,
        palette: slots.iter().map(|slot| slot.stop.clone()).collect(),
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{derive_theme, ThemeTokenSet, UtilityColorSet, UtilityRole, SURFACE_TIERS};
    use crate::contrast::contrast_ratio;
    use crate::palette::{ColorStop, PaletteSlot};

    fn blue_theme() -> ThemeTokenSet {
        let slot = PaletteSlot::new(ColorStop::parse("#3B82F6").unwrap());
        derive_theme(&[slot], &[])
    }

    #[test]
    fn test_single_slot_covers_all_tokens() {
        let theme = blue_theme();

        for (name, _) in SURFACE_TIERS {
            assert!(theme.token(name).is_some(), "missing {}", name);
        }
        for name in [
            "foreground",
            "border",
            "primary",
            "primary-foreground",
            "primary-container",
            "secondary",
            "secondary-foreground",
            "accent",
            "accent-foreground",
            "destructive",
            "destructive-foreground",
        ] {
            assert!(theme.token(name).is_some(), "missing {}", name);
        }
        for token in &theme.tokens {
            assert!(!token.description.is_empty(), "{} lacks a description", token.name);
        }
        for role in UtilityRole::ALL {
            assert!(theme.utility(role).is_some(), "missing {:?}", role);
        }
        assert_eq!(theme.palette.len(), 1);
    }

    #[test]
    fn test_primary_lightness_bounds() {
        let theme = blue_theme();
        let primary = theme.token("primary").unwrap();

        let light = primary.light.rgb.to_oklch();
        assert!(
            (0.26..=0.40).contains(&light.l),
            "light primary lightness {}",
            light.l
        );
        let dark = primary.dark.rgb.to_oklch();
        assert!(dark.l > light.l, "dark primary should be lighter");
    }

    #[test]
    fn test_surfaces_follow_tonal_elevation() {
        let theme = blue_theme();
        let tiers: Vec<_> = SURFACE_TIERS
            .iter()
            .map(|(name, _)| theme.token(name).unwrap())
            .collect();

        for pair in tiers.windows(2) {
            let light_below = pair[0].light.rgb.to_oklch().l;
            let light_above = pair[1].light.rgb.to_oklch().l;
            assert!(light_above < light_below, "light mode darkens upward");

            let dark_below = pair[0].dark.rgb.to_oklch().l;
            let dark_above = pair[1].dark.rgb.to_oklch().l;
            assert!(dark_above > dark_below, "dark mode lightens upward");
        }
    }

    #[test]
    fn test_primary_pairing_is_legible() {
        let theme = blue_theme();
        let primary = theme.token("primary").unwrap();
        let foreground = theme.token("primary-foreground").unwrap();

        let ratio = contrast_ratio(&foreground.light.rgb, &primary.light.rgb);
        assert!(ratio >= 4.5, "light mode ratio {}", ratio);
        let ratio = contrast_ratio(&foreground.dark.rgb, &primary.dark.rgb);
        assert!(ratio >= 4.5, "dark mode ratio {}", ratio);
    }

    #[test]
    fn test_empty_palette_uses_fallback() {
        let theme = derive_theme(&[], &[]);

        assert!(theme.palette.is_empty());
        let primary = theme.token("primary").unwrap();
        let light = primary.light.rgb.to_oklch();
        assert!((0.26..=0.40).contains(&light.l));
        // The fallback primary is a blue.
        assert!((200.0..300.0).contains(&light.h), "fallback hue {}", light.h);
    }

    #[test]
    fn test_warning_stays_brighter_than_error() {
        let theme = blue_theme();
        let warning = theme.utility(UtilityRole::Warning).unwrap();
        let error = theme.utility(UtilityRole::Error).unwrap();

        let warning_l = warning.light.rgb.to_oklch().l;
        let error_l = error.light.rgb.to_oklch().l;
        assert!(warning_l > error_l + 0.05);
    }

    #[test]
    fn test_utility_base_override() {
        let slot = PaletteSlot::new(ColorStop::parse("#3B82F6").unwrap());
        let custom = UtilityColorSet {
            role: UtilityRole::Success,
            base: "#15803d".parse().unwrap(),
        };
        let theme = derive_theme(&[slot], &[custom]);

        let success = theme.utility(UtilityRole::Success).unwrap();
        let hue = success.light.rgb.to_oklch().h;
        let base_hue = custom.base.to_oklch().h;
        // The override's hue carries through to the tones.
        assert!((hue - base_hue).abs() < 4.0, "hue {} vs base {}", hue, base_hue);
    }

    #[test]
    fn test_utility_subtle_washes() {
        let theme = blue_theme();

        for role in UtilityRole::ALL {
            let tones = theme.utility(role).unwrap();
            let light = tones.subtle_light.rgb.to_oklch();
            let dark = tones.subtle_dark.rgb.to_oklch();

            assert!(light.l > 0.88, "{:?} light wash lightness {}", role, light.l);
            assert!(light.c < 0.10, "{:?} light wash chroma {}", role, light.c);
            assert!(dark.l < 0.35, "{:?} dark wash lightness {}", role, dark.l);
            assert!(dark.c < 0.10, "{:?} dark wash chroma {}", role, dark.c);
            // The wash backs the role's main tone, so it must sit well above it.
            assert!(light.l > tones.light.rgb.to_oklch().l);
        }

        let info = theme.utility(UtilityRole::Info).unwrap();
        let json = serde_json::to_string(info).unwrap();
        assert!(json.contains("\"subtle_light\""));
        assert!(json.contains("\"subtle_dark\""));
    }

    #[test]
    fn test_neutral_surfaces_carry_tint() {
        let theme = blue_theme();
        let background = theme.token("background").unwrap();

        let light = background.light.rgb.to_oklch();
        assert!(light.l > 0.96);
        // Tinted towards the palette's blue, not flat gray.
        assert!(background.light.rgb.b > background.light.rgb.r);
    }
}
