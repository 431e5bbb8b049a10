//! Span-class HTML to styled text runs.
//!
//! Syntax highlighters such as highlight.js express their output as nested
//! `<span class="...">` elements. This crate turns that HTML into a flat,
//! ordered [`StyledDocument`]: a sequence of text runs, each tagged with the
//! full stack of classes in scope where the text appeared.
//!
//! # Architecture
//!
//! Conversion is two passes:
//!
//! 1. [`Tokenizer`] scans the HTML once, left to right, maintaining a
//!    [`ClassStack`] and emitting a [`StyledRun`] for every stretch of text
//!    between markup.
//! 2. [`EntityRewriter`] decodes character references (`&amp;`, `&#x27;`)
//!    across the concatenated run text, keeping every surviving character in
//!    the run it came from.
//!
//! Both passes are pure functions over their input and hold no shared state,
//! so they can run concurrently on independent documents.
//!
//! # Example
//!
//! ```
//! use tinct_markup::{EntityRewriter, Tokenizer};
//!
//! let html = r#"<span class="hljs-keyword">if</span> a &amp;&amp; b"#;
//! let doc = EntityRewriter::new().rewrite(Tokenizer::new().tokenize(html));
//!
//! assert_eq!(doc.text(), "if a && b");
//! assert_eq!(doc.runs()[0].classes(), ["hljs", "hljs-keyword"]);
//! ```

mod document;
mod entities;
mod rewrite;
mod tokenizer;

pub use document::{ClassName, ClassStack, ROOT_CLASS, StyledDocument, StyledRun};
pub use entities::{EntityDecoder, HtmlEntityDecoder};
pub use rewrite::{EntityMatch, EntityRewriter};
pub use tokenizer::Tokenizer;
