//! Themes mapping style classes to visual attributes.
//!
//! A [`Theme`] holds one [`StyleAttributes`] rule per class name and resolves
//! a whole class stack (outermost first) to the attributes that apply to a
//! run of text. Inner classes override outer ones field by field.
//!
//! Themes come from the built-in set ([`Theme::builtin`]) or from TOML files
//! ([`Theme::load`]):
//!
//! ```toml
//! name = "custom"
//!
//! [classes.hljs]
//! foreground = "#24292e"
//!
//! [classes.hljs-keyword]
//! foreground = "#d73a49"
//! weight = "bold"
//! ```
//!
//! # Example
//!
//! ```
//! use tinct_theme::{FontWeight, Theme};
//!
//! let theme = Theme::builtin("github").unwrap();
//! let style = theme.resolve_style(&["hljs", "hljs-section"]);
//! assert_eq!(style.weight, Some(FontWeight::Bold));
//! ```

mod builtin;
mod color;
mod error;
mod style;
mod theme;

pub use color::Color;
pub use error::ThemeError;
pub use style::{FontStyle, FontWeight, StyleAttributes};
pub use theme::Theme;
