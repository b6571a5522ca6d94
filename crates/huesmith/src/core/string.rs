use crate::core::conversion::{hsl_to_srgb, to_24bit};
use crate::core::wrap_hue;
use crate::error::ColorFormatError;
use crate::Float;

/// Parse a 24-bit color in hashed hexadecimal format. If successful, this
/// function returns the three coordinates as unsigned bytes plus the alpha
/// byte for the eight-digit form. It transparently handles single-digit
/// coordinates.
pub(crate) fn parse_hashed(s: &str) -> Result<([u8; 3], Option<u8>), ColorFormatError> {
    if !s.starts_with('#') {
        return Err(ColorFormatError::UnknownFormat);
    } else if s.len() != 4 && s.len() != 7 && s.len() != 9 {
        return Err(ColorFormatError::UnexpectedCharacters);
    }

    fn parse_coordinate(s: &str, index: usize) -> Result<u8, ColorFormatError> {
        let factor = if s.len() == 4 { 1 } else { 2 };
        let t = s
            .get(1 + factor * index..1 + factor * (index + 1))
            .ok_or(ColorFormatError::UnexpectedCharacters)?;
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedHex)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    }

    let c1 = parse_coordinate(s, 0)?;
    let c2 = parse_coordinate(s, 1)?;
    let c3 = parse_coordinate(s, 2)?;
    let alpha = if s.len() == 9 {
        Some(parse_coordinate(s, 3)?)
    } else {
        None
    };

    Ok(([c1, c2, c3], alpha))
}

// --------------------------------------------------------------------------------------------------------------------

/// Munge the parentheses of a functional color format, returning the body
/// between them.
fn munge_parentheses(rest: &str) -> Result<&str, ColorFormatError> {
    rest.trim_start()
        .strip_prefix('(')
        .ok_or(ColorFormatError::NoOpeningParenthesis)
        .and_then(|rest| {
            rest.strip_suffix(')')
                .ok_or(ColorFormatError::NoClosingParenthesis)
        })
}

/// Split the body of a functional color format into component tokens. Both
/// the legacy comma-separated and the modern space-separated syntax are
/// recognized, as is the slash before an alpha component.
fn split_components(body: &str) -> impl Iterator<Item = &str> {
    body.split(|c: char| c == ',' || c == '/')
        .flat_map(str::split_whitespace)
}

#[inline]
fn parse_number(t: &str) -> Result<Float, ColorFormatError> {
    t.parse().map_err(|_| ColorFormatError::MalformedNumber)
}

/// Parse an alpha component, which is either a fraction in `0..=1` or a
/// percentage, into a percentage. Out-of-range values are clamped.
fn parse_alpha(t: &str) -> Result<u8, ColorFormatError> {
    let fraction = match t.strip_suffix('%') {
        Some(t) => parse_number(t)? / 100.0,
        None => parse_number(t)?,
    };
    Ok((fraction.clamp(0.0, 1.0) * 100.0).round() as u8)
}

/// Parse a color in the CSS `rgb()`/`rgba()` functional notation. Components
/// are numbers in `0..=255` or percentages; out-of-range values are clamped,
/// not rejected.
pub(crate) fn parse_rgb_function(s: &str) -> Result<([u8; 3], Option<u8>), ColorFormatError> {
    let rest = s
        .strip_prefix("rgba")
        .or_else(|| s.strip_prefix("rgb"))
        .ok_or(ColorFormatError::UnknownFormat)?;
    let body = munge_parentheses(rest)?;

    fn parse_channel(t: Option<&str>) -> Result<u8, ColorFormatError> {
        let t = t.ok_or(ColorFormatError::MissingComponent)?;
        let value = match t.strip_suffix('%') {
            Some(t) => parse_number(t)? / 100.0 * 255.0,
            None => parse_number(t)?,
        };
        Ok(value.clamp(0.0, 255.0).round() as u8)
    }

    let mut iter = split_components(body);
    let c1 = parse_channel(iter.next())?;
    let c2 = parse_channel(iter.next())?;
    let c3 = parse_channel(iter.next())?;
    let alpha = iter.next().map(parse_alpha).transpose()?;
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyComponents);
    }

    Ok(([c1, c2, c3], alpha))
}

/// Parse a color in the CSS `hsl()`/`hsla()` functional notation. If
/// successful, this function returns the hue in degrees and saturation and
/// lightness as fractions, plus the alpha percentage. The hue wraps around
/// and accepts an optional `deg` suffix; saturation and lightness accept an
/// optional percent sign and are clamped into `0..=100`.
pub(crate) fn parse_hsl_function(s: &str) -> Result<([Float; 3], Option<u8>), ColorFormatError> {
    let rest = s
        .strip_prefix("hsla")
        .or_else(|| s.strip_prefix("hsl"))
        .ok_or(ColorFormatError::UnknownFormat)?;
    let body = munge_parentheses(rest)?;

    fn parse_hue(t: Option<&str>) -> Result<Float, ColorFormatError> {
        let t = t.ok_or(ColorFormatError::MissingComponent)?;
        let t = t.strip_suffix("deg").unwrap_or(t);
        Ok(wrap_hue(parse_number(t)?))
    }

    fn parse_percentage(t: Option<&str>) -> Result<Float, ColorFormatError> {
        let t = t.ok_or(ColorFormatError::MissingComponent)?;
        let t = t.strip_suffix('%').unwrap_or(t);
        Ok(parse_number(t)?.clamp(0.0, 100.0) / 100.0)
    }

    let mut iter = split_components(body);
    let h = parse_hue(iter.next())?;
    let s = parse_percentage(iter.next())?;
    let l = parse_percentage(iter.next())?;
    let alpha = iter.next().map(parse_alpha).transpose()?;
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyComponents);
    }

    Ok(([h, s, l], alpha))
}

// --------------------------------------------------------------------------------------------------------------------

/// Parse the string into a 24-bit color with an optional alpha percentage.
///
/// This function recognizes hashed hexadecimal colors with 3, 6, or 8 digits
/// as well as the `rgb()`/`rgba()` and `hsl()`/`hsla()` CSS functions with
/// comma- or space-separated arguments. Before trying to parse either of
/// these formats, it trims leading and trailing white space and converts
/// ASCII letters to lowercase. Out-of-range components are clamped, never
/// rejected; only structurally malformed text is an error.
pub(crate) fn parse(s: &str) -> Result<([u8; 3], Option<u8>), ColorFormatError> {
    let lowercase = s.trim().to_ascii_lowercase(); // Keep around for fn scope
    let s = lowercase.as_str();

    if s.starts_with('#') {
        let (rgb, alpha) = parse_hashed(s)?;
        Ok((
            rgb,
            alpha.map(|a| (a as Float / 255.0 * 100.0).round() as u8),
        ))
    } else if s.starts_with("rgb") {
        parse_rgb_function(s)
    } else if s.starts_with("hsl") {
        let (hsl, alpha) = parse_hsl_function(s)?;
        Ok((to_24bit(&hsl_to_srgb(&hsl)), alpha))
    } else {
        Err(ColorFormatError::UnknownFormat)
    }
}

// ====================================================================================================================
