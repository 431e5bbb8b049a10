//! Theme resolution for styled documents.

use tinct_markup::{StyledDocument, StyledRun};
use tinct_theme::{StyleAttributes, Theme};

/// A run of text with its resolved visual attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemedRun {
    pub text: String,
    pub style: StyleAttributes,
}

impl ThemedRun {
    fn resolve(run: &StyledRun, theme: &Theme) -> Self {
        Self {
            text: run.text().to_owned(),
            style: theme.resolve_style(run.classes()),
        }
    }
}

/// Resolve every run of `doc` against `theme`, preserving order.
#[must_use]
pub fn resolve_document(doc: &StyledDocument, theme: &Theme) -> Vec<ThemedRun> {
    doc.iter().map(|run| ThemedRun::resolve(run, theme)).collect()
}
