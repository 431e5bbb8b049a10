//! Theme error types.

/// Error loading or parsing a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// I/O error reading a theme file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("Theme parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A color value is not `#rgb` or `#rrggbb`.
    #[error("Invalid color {value:?} for class {class}")]
    InvalidColor {
        /// Class the color was assigned to.
        class: String,
        /// Offending value.
        value: String,
    },
    /// A rule was declared for an empty class name.
    #[error("Theme rules require a non-empty class name")]
    EmptyClassName,
}
