//! Source languages the built-in renderer can highlight.

/// Language hint accepted by [`HighlightRenderer`](crate::HighlightRenderer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Markdown,
    PlainText,
}

impl Language {
    /// Parse a language hint.
    ///
    /// Matching is case-insensitive. Returns None for unsupported languages.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" | "mkd" | "mkdown" => Some(Self::Markdown),
            "plaintext" | "text" | "txt" | "plain" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::PlainText => "plaintext",
        }
    }
}
