//! Built-in Markdown source highlighter.
//!
//! Produces highlight.js-style markup for Markdown *source*: the visible
//! text of the output equals the input exactly, with constructs wrapped in
//! `<span class="hljs-...">` elements.

use std::cmp::Reverse;

use pulldown_cmark::{Event, Options, Parser, Tag};

use crate::escape::push_escaped;
use crate::facade::MarkdownRenderer;
use crate::language::Language;

const SECTION: &str = "hljs-section";
const QUOTE: &str = "hljs-quote";
const BULLET: &str = "hljs-bullet";
const CODE: &str = "hljs-code";
const EMPHASIS: &str = "hljs-emphasis";
const STRONG: &str = "hljs-strong";
const DELETION: &str = "hljs-deletion";
const LINK: &str = "hljs-link";
const TAG: &str = "hljs-tag";

/// A class applied to a byte range of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Highlight {
    start: usize,
    end: usize,
    class: &'static str,
}

/// Highlights Markdown source into span-class HTML.
///
/// The language hint selects the grammar. An unsupported hint makes
/// [`render`](MarkdownRenderer::render) return `None`.
#[derive(Debug, Clone)]
pub struct HighlightRenderer {
    language: String,
    gfm: bool,
}

impl HighlightRenderer {
    /// Create a Markdown highlighter with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: Language::Markdown.name().to_owned(),
            gfm: true,
        }
    }

    /// Set the language hint.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser recognizes:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Language hint as configured.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Collect class ranges for `source`, sorted outermost first.
    fn highlights(&self, source: &str) -> Vec<Highlight> {
        let mut highlights = Vec::new();
        let mut push = |start: usize, end: usize, class: &'static str| {
            if start < end {
                highlights.push(Highlight { start, end, class });
            }
        };

        for (event, range) in Parser::new_ext(source, self.parser_options()).into_offset_iter() {
            match event {
                Event::Start(tag) => match tag {
                    Tag::Item => {
                        let marker = list_marker_len(&source[range.start..]);
                        push(range.start, range.start + marker, BULLET);
                    }
                    tag => {
                        if let Some(class) = tag_class(&tag) {
                            push(range.start, range.end, class);
                        }
                    }
                },
                Event::Code(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                    push(range.start, range.end, CODE);
                }
                Event::InlineHtml(_) => push(range.start, range.end, TAG),
                Event::Rule => push(range.start, range.end, SECTION),
                Event::TaskListMarker(_) => push(range.start, range.end, BULLET),
                Event::FootnoteReference(_) => push(range.start, range.end, LINK),
                _ => {}
            }
        }

        highlights.sort_by_key(|h| (h.start, Reverse(h.end)));
        highlights
    }
}

impl Default for HighlightRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for HighlightRenderer {
    fn render(&self, source: &str) -> Option<String> {
        let Some(language) = Language::parse(&self.language) else {
            tracing::debug!(language = %self.language, "Unsupported language hint");
            return None;
        };

        let mut out = String::with_capacity(source.len() * 2);
        match language {
            Language::Markdown => write_nested(source, &self.highlights(source), &mut out),
            Language::PlainText => push_escaped(&mut out, source),
        }
        Some(out)
    }
}

/// Class for a block or inline container tag, if it is highlighted.
fn tag_class(tag: &Tag<'_>) -> Option<&'static str> {
    Some(match tag {
        Tag::Heading { .. } => SECTION,
        Tag::BlockQuote(_) => QUOTE,
        Tag::CodeBlock(_) => CODE,
        Tag::HtmlBlock => TAG,
        Tag::Emphasis => EMPHASIS,
        Tag::Strong => STRONG,
        Tag::Strikethrough => DELETION,
        Tag::Link { .. } | Tag::Image { .. } => LINK,
        _ => return None,
    })
}

/// Length of a list item marker (`-`, `*`, `+`, `1.`, `1)`) at the start of `s`.
fn list_marker_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b'-' | b'*' | b'+') => 1,
        Some(b) if b.is_ascii_digit() => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            match bytes.get(digits) {
                Some(b'.' | b')') => digits + 1,
                _ => 0,
            }
        }
        _ => 0,
    }
}

/// Write `source` escaped, wrapping each highlight in a span.
///
/// Highlights must be sorted by start, longest first. A highlight reaching
/// past its enclosing span is clamped so the output stays well nested.
fn write_nested(source: &str, highlights: &[Highlight], out: &mut String) {
    let mut open: Vec<usize> = Vec::new();
    let mut pos = 0;

    for h in highlights {
        close_spans(source, h.start, &mut open, &mut pos, out);
        push_escaped(out, &source[pos..h.start]);
        pos = h.start;

        let limit = open.last().copied().unwrap_or(source.len());
        let end = h.end.min(limit);
        if end <= h.start {
            continue;
        }
        out.push_str("<span class=\"");
        out.push_str(h.class);
        out.push_str("\">");
        open.push(end);
    }

    close_spans(source, source.len(), &mut open, &mut pos, out);
    push_escaped(out, &source[pos..]);
}

/// Close every open span ending at or before `offset`.
fn close_spans(source: &str, offset: usize, open: &mut Vec<usize>, pos: &mut usize, out: &mut String) {
    while let Some(&end) = open.last() {
        if end > offset {
            break;
        }
        push_escaped(out, &source[*pos..end]);
        *pos = end;
        out.push_str("</span>");
        open.pop();
    }
}
