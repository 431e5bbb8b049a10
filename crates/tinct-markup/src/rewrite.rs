//! Character reference rewriting across styled runs.
//!
//! References are matched against the concatenated document text, not per
//! run, so a reference split across two runs is still found. Each decoded
//! character stays in the run that held the first byte of its reference.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::{StyledDocument, StyledRun};
use crate::entities::{EntityDecoder, HtmlEntityDecoder};

/// One textual character reference token.
static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#?[A-Za-z0-9]+;").expect("invalid entity regex"));

/// A decodable reference found in the concatenated document text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityMatch {
    /// Byte range of the reference in the text before any replacement.
    pub range: Range<usize>,
    /// Character the reference decodes to.
    pub decoded: char,
}

/// Replaces character references in a [`StyledDocument`] with the characters
/// they decode to.
#[derive(Clone, Debug, Default)]
pub struct EntityRewriter<D = HtmlEntityDecoder> {
    decoder: D,
}

impl EntityRewriter {
    /// Create a rewriter using [`HtmlEntityDecoder`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: EntityDecoder> EntityRewriter<D> {
    /// Create a rewriter with a custom decoder.
    #[must_use]
    pub fn with_decoder(decoder: D) -> Self {
        Self { decoder }
    }

    /// Find every decodable reference in `text`, left to right.
    ///
    /// References the decoder rejects are skipped.
    pub fn find_matches(&self, text: &str) -> Vec<EntityMatch> {
        ENTITY_PATTERN
            .find_iter(text)
            .filter_map(|m| {
                self.decoder.decode(m.as_str()).map(|decoded| EntityMatch {
                    range: m.range(),
                    decoded,
                })
            })
            .collect()
    }

    /// Decode all references in `doc`.
    ///
    /// Replacements are applied left to right. Every match location comes
    /// from the original text, so each is shifted by the net size change of
    /// the replacements before it.
    #[must_use]
    pub fn rewrite(&self, doc: StyledDocument) -> StyledDocument {
        let matches = self.find_matches(&doc.text());
        if matches.is_empty() {
            return doc;
        }

        let mut runs = doc.into_runs();
        let mut cursor = RunCursor::default();
        // Net byte delta (new length minus old length) of applied replacements.
        let mut shift: isize = 0;

        for m in &matches {
            let start = shifted(m.range.start, shift);
            debug_assert!(start.is_some(), "shift {shift} underflows offset {}", m.range.start);
            let Some(start) = start else {
                continue;
            };
            replace_at(&mut runs, &mut cursor, start, m.range.len(), m.decoded);
            shift += m.decoded.len_utf8().cast_signed() - m.range.len().cast_signed();
        }

        runs.retain(|run| !run.text.is_empty());
        tracing::trace!(replaced = matches.len(), "Decoded character references");
        StyledDocument::from(runs)
    }
}

/// Original offset moved by the net delta of earlier replacements.
///
/// `None` only if the delta exceeds the offset, which earlier replacements
/// (each strictly before `offset`) cannot produce.
fn shifted(offset: usize, shift: isize) -> Option<usize> {
    offset.checked_add_signed(shift)
}

/// Position of one run within the current concatenated text.
///
/// Matches arrive in increasing order, so the cursor only moves forward.
#[derive(Default)]
struct RunCursor {
    index: usize,
    base: usize,
}

impl RunCursor {
    /// Advance to the run containing byte `offset`.
    fn seek(&mut self, runs: &[StyledRun], offset: usize) -> Option<usize> {
        while let Some(run) = runs.get(self.index) {
            if offset < self.base + run.text.len() {
                return Some(offset - self.base);
            }
            self.base += run.text.len();
            self.index += 1;
        }
        None
    }
}

/// Replace `len` bytes starting at `start` with `decoded`.
///
/// The character lands in the run holding `start`; bytes of the reference
/// that spill into later runs are removed from those runs.
fn replace_at(
    runs: &mut [StyledRun],
    cursor: &mut RunCursor,
    start: usize,
    len: usize,
    decoded: char,
) {
    let Some(local) = cursor.seek(runs, start) else {
        return;
    };
    let mut buf = [0u8; 4];
    let first = &mut runs[cursor.index].text;
    let here = len.min(first.len() - local);
    first.replace_range(local..local + here, decoded.encode_utf8(&mut buf));

    let mut remaining = len - here;
    for run in runs.iter_mut().skip(cursor.index + 1) {
        if remaining == 0 {
            break;
        }
        let take = remaining.min(run.text.len());
        run.text.replace_range(..take, "");
        remaining -= take;
    }
}
