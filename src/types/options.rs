/// How raw bytes are turned into text before parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8; invalid sequences become `U+FFFD`.
    #[default]
    Utf8Lossy,
    /// Windows-1252, the code page most DBC editors write.
    Windows1252,
    /// UTF-8 when the bytes are valid UTF-8, Windows-1252 otherwise.
    Auto,
}

/// Parser configuration.
///
/// ```
/// use can_diff::{ParseOptions, TextEncoding};
///
/// let opts = ParseOptions {
///     encoding: TextEncoding::Auto,
///     ..Default::default()
/// };
/// assert!(!opts.transliterate);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub encoding: TextEncoding,
    /// Replace `ü ö ä ß Ü Ö Ä ¿` with ASCII fallbacks after decoding.
    pub transliterate: bool,
}
