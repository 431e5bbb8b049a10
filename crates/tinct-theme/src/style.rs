//! Visual attributes applied to a run of text.

use serde::Deserialize;

use crate::color::Color;

/// Font weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Font style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Attributes a theme assigns to a class.
///
/// Every field is optional; `None` means "inherit from the enclosing class".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleAttributes {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub weight: Option<FontWeight>,
    pub style: Option<FontStyle>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
}

impl StyleAttributes {
    /// Attributes with nothing set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            foreground: None,
            background: None,
            weight: None,
            style: None,
            underline: None,
            strikethrough: None,
        }
    }

    /// Attributes with only a foreground color.
    #[must_use]
    pub const fn fg(color: Color) -> Self {
        let mut attrs = Self::new();
        attrs.foreground = Some(color);
        attrs
    }

    /// Set the background color.
    #[must_use]
    pub const fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set bold weight.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.weight = Some(FontWeight::Bold);
        self
    }

    /// Set italic style.
    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.style = Some(FontStyle::Italic);
        self
    }

    /// Set underline.
    #[must_use]
    pub const fn underlined(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    /// Set strikethrough.
    #[must_use]
    pub const fn struck(mut self) -> Self {
        self.strikethrough = Some(true);
        self
    }

    /// Overlay the fields set in `over` onto `self`.
    pub fn merge(&mut self, over: &Self) {
        self.foreground = over.foreground.or(self.foreground);
        self.background = over.background.or(self.background);
        self.weight = over.weight.or(self.weight);
        self.style = over.style.or(self.style);
        self.underline = over.underline.or(self.underline);
        self.strikethrough = over.strikethrough.or(self.strikethrough);
    }

    /// Whether bold weight is in effect.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.weight == Some(FontWeight::Bold)
    }

    /// Whether italic style is in effect.
    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.style == Some(FontStyle::Italic)
    }

    /// Whether no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
