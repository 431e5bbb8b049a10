//! Single-pass span-class tokenizer.
//!
//! Recognizes exactly two tags: `<span class="NAME">` and its closing tag.
//! Everything else is text. A `<` that does not start a recognized tag is
//! emitted as literal text and scanning resumes at the next byte, so the
//! remainder of an unknown tag surfaces as ordinary text.

use crate::document::{ClassName, ClassStack, StyledDocument, StyledRun};

const OPEN_PREFIX: &str = "<span class=\"";
const OPEN_SUFFIX: &str = "\">";

/// Converts span-class HTML into a [`StyledDocument`].
///
/// Never fails. Malformed markup (unmatched closing tags, truncated or
/// unknown tags) is skipped or literalized and the scan continues.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    root: ClassName,
}

impl Tokenizer {
    /// Create a tokenizer with the default `hljs` root class.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different root class at the bottom of every stack.
    #[must_use]
    pub fn with_root(mut self, root: ClassName) -> Self {
        self.root = root;
        self
    }

    /// Root class at the bottom of every run's stack.
    #[must_use]
    pub fn root(&self) -> &ClassName {
        &self.root
    }

    /// Tokenize `html` into styled runs.
    ///
    /// Linear in the input length: once a search for a tag's closing
    /// delimiter fails, later tags needing the same delimiter are
    /// literalized without searching again.
    #[must_use]
    pub fn tokenize(&self, html: &str) -> StyledDocument {
        let mut stack = ClassStack::new(self.root.clone());
        let mut runs = Vec::new();
        let mut pos = 0;
        // No `>` exists at or after this offset.
        let mut no_gt_from = usize::MAX;
        // No `">` exists at or after this offset.
        let mut no_suffix_from = usize::MAX;

        while pos < html.len() {
            let rest = &html[pos..];
            let Some(lt) = rest.find('<') else {
                emit(&mut runs, rest, &stack);
                break;
            };
            emit(&mut runs, &rest[..lt], &stack);
            pos += lt;

            let tag = &html[pos..];
            match tag.as_bytes().get(1) {
                Some(b's') => match parse_open_tag(tag, pos, no_suffix_from) {
                    OpenTag::Span { name, consumed } => {
                        stack.push(ClassName::new(name));
                        pos += consumed;
                        continue;
                    }
                    OpenTag::Unterminated => {
                        no_suffix_from = no_suffix_from.min(pos);
                        tracing::debug!(offset = pos, "Truncated span tag, treating '<' as text");
                    }
                    OpenTag::Other => {
                        tracing::trace!(offset = pos, "Unrecognized tag, treating '<' as text");
                    }
                },
                Some(b'/') => {
                    let gt = if pos < no_gt_from { tag.find('>') } else { None };
                    if let Some(gt) = gt {
                        if !stack.pop() {
                            tracing::debug!(offset = pos, "Closing tag without open span ignored");
                        }
                        pos += gt + 1;
                        continue;
                    }
                    no_gt_from = no_gt_from.min(pos);
                    tracing::debug!(offset = pos, "Truncated closing tag, treating '<' as text");
                }
                _ => {}
            }

            emit(&mut runs, "<", &stack);
            pos += 1;
        }

        tracing::trace!(runs = runs.len(), "Tokenized span markup");
        StyledDocument::from(runs)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            root: ClassName::root(),
        }
    }
}

/// Outcome of parsing an opening tag candidate.
#[derive(Debug, PartialEq, Eq)]
enum OpenTag<'a> {
    /// `<span class="NAME">`: the verbatim class attribute and bytes consumed.
    Span { name: &'a str, consumed: usize },
    /// The prefix matched but no `">` follows.
    Unterminated,
    /// Not a span opening tag.
    Other,
}

/// Parse `<span class="NAME">` at the start of `tag`, found at `offset`.
///
/// The search for `">` is skipped when `offset` is at or past
/// `no_suffix_from`.
fn parse_open_tag(tag: &str, offset: usize, no_suffix_from: usize) -> OpenTag<'_> {
    let Some(body) = tag.strip_prefix(OPEN_PREFIX) else {
        return OpenTag::Other;
    };
    if offset >= no_suffix_from {
        return OpenTag::Unterminated;
    }
    match body.find(OPEN_SUFFIX) {
        Some(end) => OpenTag::Span {
            name: &body[..end],
            consumed: OPEN_PREFIX.len() + end + OPEN_SUFFIX.len(),
        },
        None => OpenTag::Unterminated,
    }
}

fn emit(runs: &mut Vec<StyledRun>, text: &str, stack: &ClassStack) {
    if !text.is_empty() {
        runs.push(StyledRun::new(text, stack.snapshot()));
    }
}
