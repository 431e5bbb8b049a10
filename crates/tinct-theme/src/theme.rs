//! Theme definition, resolution and loading.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::builtin;
use crate::color::Color;
use crate::error::ThemeError;
use crate::style::{FontStyle, FontWeight, StyleAttributes};

/// A named set of class rules.
///
/// Immutable once built; share it by reference across render calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    name: String,
    rules: HashMap<String, StyleAttributes>,
}

/// Theme file as parsed from TOML.
#[derive(Debug, Deserialize)]
struct ThemeFile {
    name: String,
    #[serde(default)]
    classes: BTreeMap<String, RuleRaw>,
}

/// One class rule as parsed from TOML (colors as strings).
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RuleRaw {
    foreground: Option<String>,
    background: Option<String>,
    weight: Option<FontWeight>,
    style: Option<FontStyle>,
    underline: Option<bool>,
    strikethrough: Option<bool>,
}

impl RuleRaw {
    fn resolve(self, class: &str) -> Result<StyleAttributes, ThemeError> {
        let color = |value: Option<String>| -> Result<Option<Color>, ThemeError> {
            value
                .map(|v| {
                    Color::parse(&v).ok_or_else(|| ThemeError::InvalidColor {
                        class: class.to_owned(),
                        value: v,
                    })
                })
                .transpose()
        };
        Ok(StyleAttributes {
            foreground: color(self.foreground)?,
            background: color(self.background)?,
            weight: self.weight,
            style: self.style,
            underline: self.underline,
            strikethrough: self.strikethrough,
        })
    }
}

impl Theme {
    /// Create an empty theme.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: HashMap::new(),
        }
    }

    /// Add or replace the rule for `class`.
    #[must_use]
    pub fn with_rule(mut self, class: impl Into<String>, attrs: StyleAttributes) -> Self {
        self.rules.insert(class.into(), attrs);
        self
    }

    /// Theme name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rule for a single class token, if the theme defines one.
    #[must_use]
    pub fn rule(&self, class: &str) -> Option<&StyleAttributes> {
        self.rules.get(class)
    }

    /// Number of class rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the theme defines no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve the attributes for a class stack, outermost first.
    ///
    /// A class value may hold several whitespace-separated tokens
    /// (`hljs-title function_`); each token's rule is applied in order.
    /// Later classes override earlier ones. Unknown classes are ignored.
    pub fn resolve_style<S: AsRef<str>>(&self, stack: &[S]) -> StyleAttributes {
        let mut resolved = StyleAttributes::default();
        for class in stack {
            for token in class.as_ref().split_whitespace() {
                if let Some(rule) = self.rules.get(token) {
                    resolved.merge(rule);
                }
            }
        }
        resolved
    }

    /// Parse a theme from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, a color is invalid, or a
    /// class name is empty.
    pub fn from_toml(content: &str) -> Result<Self, ThemeError> {
        let file: ThemeFile = toml::from_str(content)?;
        let mut theme = Self::new(file.name);
        for (class, raw) in file.classes {
            if class.trim().is_empty() {
                return Err(ThemeError::EmptyClassName);
            }
            let attrs = raw.resolve(&class)?;
            theme.rules.insert(class, attrs);
        }
        Ok(theme)
    }

    /// Load a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        let theme = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %theme.name, rules = theme.len(), "Loaded theme");
        Ok(theme)
    }

    /// Look up a built-in theme by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        builtin::lookup(name)
    }

    /// Names of the built-in themes.
    #[must_use]
    pub fn builtin_names() -> &'static [&'static str] {
        builtin::NAMES
    }
}

impl Default for Theme {
    fn default() -> Self {
        builtin::github()
    }
}
