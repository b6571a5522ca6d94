mod contrast;
mod conversion;
mod difference;
mod equality;
mod gamut;
mod math;
mod string;

// contrast
pub(crate) use contrast::{
    contrast_ratio_of_luminance, luminance, to_contrast, to_contrast_luminance,
};

// conversion
pub(crate) use conversion::{
    cmyk_to_srgb, from_24bit, hsl_to_srgb, hsv_to_srgb, oklab_to_oklch, oklch_to_oklab,
    srgb_to_cmyk, srgb_to_hsl, srgb_to_hsv, srgb_to_oklab, to_24bit, ACHROMATIC_CHROMA,
};

// difference
pub(crate) use difference::{delta_e_ok, find_closest};

// equality
pub use equality::to_eq_bits;
pub(crate) use equality::to_eq_hue_bits;

// gamut
pub(crate) use gamut::oklch_to_gamut;

// math
pub(crate) use math::{hue_difference, interpolate_hue, wrap_hue, FloatExt};

// string
pub(crate) use string::parse;
