//! Utility module with huesmith's errors.

/// An erroneous color format.
///
/// Every variant describes one way a textual color can be malformed. Parsing
/// never panics; it surfaces one of these instead, so that callers can fall
/// back to a default color.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorFormatError {
    /// A color format that does not start with a known prefix such as `#`,
    /// `rgb(`, or `hsl(`.
    #[error("color format should start with `#`, `rgb(`, or `hsl(`")]
    UnknownFormat,

    /// A hashed color format with an unexpected number of characters. For
    /// example, `#00` is missing a hexadecimal digit, whereas `#1234567` has
    /// one too many for the six-digit form and one too few for the eight-digit
    /// form.
    #[error("hashed color format should have 3, 6, or 8 hexadecimal digits")]
    UnexpectedCharacters,

    /// A color format with a malformed hexadecimal number. For example, `#efg`
    /// has a malformed third coordinate.
    #[error("color format coordinates should be hexadecimal digits but are not")]
    MalformedHex,

    /// A functional color format without the opening parenthesis. For example,
    /// `rgb 0 0 0)` is missing the opening parenthesis.
    #[error("color format should include an opening parenthesis but has none")]
    NoOpeningParenthesis,

    /// A functional color format without the closing parenthesis. For example,
    /// `hsl(120 50% 50%` is missing the closing parenthesis.
    #[error("color format should include a closing parenthesis but has none")]
    NoClosingParenthesis,

    /// A functional color format that is missing a component. For example,
    /// `rgb(0, 0)` has two components where three are expected.
    #[error("color format should have 3 components but is missing one")]
    MissingComponent,

    /// A functional color format with a malformed numeric component. For
    /// example, `rgb(xyz, 0, 0)` has a malformed first component.
    #[error("color format components should be numbers but are not")]
    MalformedNumber,

    /// A functional color format with surplus components. For example,
    /// `hsl(1, 2%, 3%, 4, 5)` has at least one component too many.
    #[error("color format should have 3 or 4 components but has more")]
    TooManyComponents,
}
