//! # Huesmith
//!
//! Huesmith is a color-science engine for building, scoring, and theming
//! color palettes.
//!
//!
//! ## 1. Overview
//!
//! Huesmith's main abstractions are:
//!
//!   * [`Rgb`], [`Hsl`], [`Hsv`], [`Cmyk`], [`Oklab`], and [`Oklch`]
//!     implement the **color spaces** of the engine, with lossless hops
//!     between them through 24-bit sRGB as the canonical interchange format.
//!     All perceptual work, including gamut mapping, mixing, and color
//!     difference, happens in Oklab/Oklch.
//!   * [`ColorStop`] is a **resolved palette entry** carrying hex, RGB, and
//!     HSL renditions of one color, while [`PaletteSlot`] adds the editing
//!     state around it.
//!   * The [`harmony`] module **generates palettes** from classic hue
//!     geometry, Matsuda's arc templates, and procedural sweeps, with
//!     optional seed colors and a warm/cool temperature bias.
//!   * The [`contrast`] module **scores legibility** with WCAG 2.1 contrast
//!     ratios and APCA lightness contrast, and suggests minimal lightness
//!     fixes for failing pairs.
//!   * The [`theme`] module **derives design tokens**, turning a palette
//!     into tinted surface tiers, colored token families, and utility roles
//!     with light and dark values for every token.
//!   * The [`quantize`] module **extracts seed colors** from decoded image
//!     pixels with a median-cut quantizer.
//!   * The [`naming`] module maps colors to and from the CSS named colors.
//!
//!
//! ## 2. Example
//!
//! Parse a seed color, pin it into a generated palette, and check the
//! result:
//!
//! ```
//! use huesmith::harmony::{generate_default, HarmonyMode, SeedBehavior};
//! use huesmith::ColorStop;
//!
//! let seed = ColorStop::parse("#3b82f6")?;
//! let palette = generate_default(
//!     HarmonyMode::Triadic,
//!     6,
//!     &[seed],
//!     SeedBehavior::Pin,
//!     0.0,
//! );
//! assert_eq!(palette.len(), 6);
//! assert_eq!(palette[0].hex, "#3b82f6");
//! # Ok::<(), huesmith::error::ColorFormatError>(())
//! ```
//!
//! Scoring a foreground/background pair is just as direct:
//!
//! ```
//! use huesmith::contrast::{contrast_ratio, WcagLevel};
//! use huesmith::Rgb;
//!
//! let ratio = contrast_ratio(&Rgb::new(0, 0, 0), &Rgb::new(255, 255, 255));
//! assert!((ratio - 21.0).abs() < 0.01);
//! assert_eq!(WcagLevel::from_ratio(ratio), WcagLevel::Aaa);
//! ```
//!
//!
//! ## 3. Features
//!
//! The `f64` feature, which is enabled by default, selects [`f64`] as
//! [`Float`]. Without it, huesmith falls back to [`f32`].

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

mod color;
pub mod contrast;
mod core;
pub mod error;
pub mod harmony;
pub mod naming;
mod palette;
pub mod quantize;
pub mod theme;

#[doc(hidden)]
pub use core::to_eq_bits;

pub use color::{Cmyk, Hsl, Hsv, Oklab, Oklch, Rgb};
pub use palette::{parse_color, ColorStop, PaletteSlot};
