//! Styled run data model.

use std::fmt;
use std::ops::Deref;

/// Class that is always at the bottom of a [`ClassStack`].
pub const ROOT_CLASS: &str = "hljs";

/// A single style class name, e.g. `hljs-keyword`.
///
/// Never empty. The value is kept verbatim as it appeared in the markup,
/// so it may contain several whitespace-separated tokens.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ClassName(Box<str>);

impl ClassName {
    /// Create a class name, returning `None` for the empty string.
    #[must_use]
    pub fn new(name: &str) -> Option<Self> {
        if name.is_empty() {
            None
        } else {
            Some(Self(name.into()))
        }
    }

    /// The [`ROOT_CLASS`] name.
    #[must_use]
    pub fn root() -> Self {
        Self(ROOT_CLASS.into())
    }

    /// The class name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ClassName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ClassName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ClassName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Stack of classes in scope at the current scan position.
///
/// The bottom frame holds the root class and is never popped. A span with an
/// empty class attribute still occupies a frame so that its closing tag pops
/// the right entry, but it contributes nothing to [`snapshot`](Self::snapshot).
#[derive(Clone, Debug)]
pub struct ClassStack {
    frames: Vec<Option<ClassName>>,
}

impl ClassStack {
    /// Create a stack holding only `root`.
    #[must_use]
    pub fn new(root: ClassName) -> Self {
        Self {
            frames: vec![Some(root)],
        }
    }

    /// Push a frame. `None` opens an anonymous frame.
    pub fn push(&mut self, class: Option<ClassName>) {
        self.frames.push(class);
    }

    /// Pop the innermost frame.
    ///
    /// Returns `false` without modifying the stack when only the root is left.
    pub fn pop(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    /// Number of frames, root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Named classes currently in scope, outermost first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ClassName> {
        self.frames.iter().flatten().cloned().collect()
    }
}

impl Default for ClassStack {
    fn default() -> Self {
        Self::new(ClassName::root())
    }
}

/// A fragment of text and the classes in scope where it appeared.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StyledRun {
    pub(crate) text: String,
    pub(crate) classes: Vec<ClassName>,
}

impl StyledRun {
    /// Create a run from text and a class stack snapshot.
    #[must_use]
    pub fn new(text: impl Into<String>, classes: Vec<ClassName>) -> Self {
        Self {
            text: text.into(),
            classes,
        }
    }

    /// Run text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Classes in scope, outermost (root) first.
    #[must_use]
    pub fn classes(&self) -> &[ClassName] {
        &self.classes
    }

    /// Innermost class, if any.
    #[must_use]
    pub fn innermost(&self) -> Option<&ClassName> {
        self.classes.last()
    }
}

/// Ordered sequence of styled runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct StyledDocument {
    runs: Vec<StyledRun>,
}

impl StyledDocument {
    /// Runs in document order.
    #[must_use]
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Consume the document, returning its runs.
    #[must_use]
    pub fn into_runs(self) -> Vec<StyledRun> {
        self.runs
    }

    /// Iterate over runs in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, StyledRun> {
        self.runs.iter()
    }

    /// Concatenated text of all runs.
    #[must_use]
    pub fn text(&self) -> String {
        let len = self.runs.iter().map(|r| r.text.len()).sum();
        let mut text = String::with_capacity(len);
        for run in &self.runs {
            text.push_str(&run.text);
        }
        text
    }

    /// Number of runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether the document has no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl From<Vec<StyledRun>> for StyledDocument {
    fn from(runs: Vec<StyledRun>) -> Self {
        Self { runs }
    }
}

impl IntoIterator for StyledDocument {
    type Item = StyledRun;
    type IntoIter = std::vec::IntoIter<StyledRun>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.into_iter()
    }
}

impl<'a> IntoIterator for &'a StyledDocument {
    type Item = &'a StyledRun;
    type IntoIter = std::slice::Iter<'a, StyledRun>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> ClassName {
        ClassName::new(name).unwrap()
    }

    #[test]
    fn test_class_name_rejects_empty() {
        assert!(ClassName::new("").is_none());
        assert_eq!(class("hljs-keyword"), "hljs-keyword");
    }

    #[test]
    fn test_stack_starts_with_root() {
        let stack = ClassStack::default();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.snapshot(), vec![class(ROOT_CLASS)]);
    }

    #[test]
    fn test_stack_never_pops_root() {
        let mut stack = ClassStack::default();
        stack.push(Some(class("a")));
        assert!(stack.pop());
        assert!(!stack.pop());
        assert!(!stack.pop());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.snapshot(), vec![class(ROOT_CLASS)]);
    }

    #[test]
    fn test_anonymous_frame_hidden_from_snapshot() {
        let mut stack = ClassStack::default();
        stack.push(Some(class("a")));
        stack.push(None);
        stack.push(Some(class("b")));
        assert_eq!(stack.depth(), 4);
        assert_eq!(stack.snapshot(), vec![class("hljs"), class("a"), class("b")]);

        stack.pop();
        stack.pop();
        assert_eq!(stack.snapshot(), vec![class("hljs"), class("a")]);
    }

    #[test]
    fn test_document_text_concatenates_runs() {
        let doc = StyledDocument::from(vec![
            StyledRun::new("if", vec![class("hljs"), class("hljs-keyword")]),
            StyledRun::new(" x", vec![class("hljs")]),
        ]);
        assert_eq!(doc.text(), "if x");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.runs()[0].innermost(), Some(&class("hljs-keyword")));
    }

    #[test]
    fn test_empty_document() {
        let doc = StyledDocument::default();
        assert!(doc.is_empty());
        assert_eq!(doc.text(), "");
    }
}
