//! Markdown to styled text runs.
//!
//! [`MarkdownRenderFacade`] ties the pipeline together:
//!
//! 1. A [`MarkdownRenderer`] turns source text into span-class HTML, or
//!    reports that it has no output for this input.
//! 2. [`tinct_markup::Tokenizer`] converts the HTML into styled runs.
//! 3. [`tinct_markup::EntityRewriter`] decodes character references.
//!
//! The renderer is a pluggable strategy. [`HighlightRenderer`] is the
//! built-in one: it highlights Markdown source with pulldown-cmark, using
//! highlight.js class names. Any closure `Fn(&str) -> Option<String>` works
//! too, e.g. a bridge to an embedded scripting runtime.
//!
//! # Example
//!
//! ```
//! use tinct_renderer::{HighlightRenderer, MarkdownRenderFacade};
//!
//! let facade = MarkdownRenderFacade::new(HighlightRenderer::new());
//! let doc = facade.render("# Title\n\nSome *text* & more").unwrap();
//!
//! assert_eq!(doc.text(), "# Title\n\nSome *text* & more");
//! assert_eq!(doc.runs()[0].classes(), ["hljs", "hljs-section"]);
//! ```

mod escape;
mod facade;
mod highlight;
mod language;
mod themed;

pub use escape::escape_html;
pub use facade::{MarkdownRenderFacade, MarkdownRenderer, UNDEFINED_OUTPUT};
pub use highlight::HighlightRenderer;
pub use language::Language;
pub use themed::{ThemedRun, resolve_document};
