//! Render facade: renderer output to styled runs.

use tinct_markup::{
    ClassName, EntityDecoder, EntityRewriter, HtmlEntityDecoder, StyledDocument, Tokenizer,
};
use tinct_theme::Theme;

use crate::themed::{ThemedRun, resolve_document};

/// Sentinel some renderers return instead of signalling "no output".
pub const UNDEFINED_OUTPUT: &str = "undefined";

/// Strategy that turns Markdown source into span-class HTML.
///
/// Returning `None` means the renderer has no output for this input.
pub trait MarkdownRenderer {
    fn render(&self, source: &str) -> Option<String>;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> Option<String>,
{
    fn render(&self, source: &str) -> Option<String> {
        self(source)
    }
}

/// Renders Markdown into a [`StyledDocument`].
///
/// Holds no per-call state, so one facade can serve any number of
/// sequential or concurrent calls as long as the renderer allows it.
#[derive(Debug, Clone)]
pub struct MarkdownRenderFacade<R, D = HtmlEntityDecoder> {
    renderer: R,
    tokenizer: Tokenizer,
    rewriter: EntityRewriter<D>,
}

impl<R: MarkdownRenderer> MarkdownRenderFacade<R> {
    /// Create a facade with the default root class and HTML entity decoding.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            tokenizer: Tokenizer::new(),
            rewriter: EntityRewriter::new(),
        }
    }
}

impl<R: MarkdownRenderer, D: EntityDecoder> MarkdownRenderFacade<R, D> {
    /// Use `root` as the implicit outermost class of every run.
    #[must_use]
    pub fn with_root_class(mut self, root: ClassName) -> Self {
        self.tokenizer = self.tokenizer.with_root(root);
        self
    }

    /// Replace the entity decoder.
    pub fn with_decoder<E: EntityDecoder>(self, decoder: E) -> MarkdownRenderFacade<R, E> {
        MarkdownRenderFacade {
            renderer: self.renderer,
            tokenizer: self.tokenizer,
            rewriter: EntityRewriter::with_decoder(decoder),
        }
    }

    /// The wrapped renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render `source` to styled runs.
    ///
    /// Returns `None` when the renderer produces no output, or produces the
    /// literal [`UNDEFINED_OUTPUT`] sentinel.
    pub fn render(&self, source: &str) -> Option<StyledDocument> {
        let Some(html) = self.renderer.render(source) else {
            tracing::debug!(len = source.len(), "Renderer produced no output");
            return None;
        };
        if html == UNDEFINED_OUTPUT {
            tracing::debug!(len = source.len(), "Renderer returned undefined sentinel");
            return None;
        }
        Some(self.render_html(&html))
    }

    /// Convert already-rendered span-class HTML to styled runs.
    pub fn render_html(&self, html: &str) -> StyledDocument {
        let doc = self.rewriter.rewrite(self.tokenizer.tokenize(html));
        tracing::trace!(runs = doc.len(), "Rendered document");
        doc
    }

    /// Render `source` and resolve every run's style against `theme`.
    pub fn render_themed(&self, source: &str, theme: &Theme) -> Option<Vec<ThemedRun>> {
        self.render(source).map(|doc| resolve_document(&doc, theme))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tinct_markup::StyledRun;

    use super::*;
    use crate::HighlightRenderer;

    fn class(name: &str) -> ClassName {
        ClassName::new(name).unwrap()
    }

    fn run(text: &str, classes: &[&str]) -> StyledRun {
        StyledRun::new(text, classes.iter().map(|c| class(c)).collect())
    }

    fn fixed(html: &'static str) -> impl Fn(&str) -> Option<String> {
        move |_| Some(html.to_owned())
    }

    #[test]
    fn test_render_fixed_output() {
        let facade = MarkdownRenderFacade::new(fixed(
            "<span class=\"hljs-section\"># Title</span>\n\nSome <span class=\"hljs-emphasis\">*text*</span> &amp; more",
        ));
        let doc = facade.render("ignored").unwrap();
        assert_eq!(
            doc.runs(),
            [
                run("# Title", &["hljs", "hljs-section"]),
                run("\n\nSome ", &["hljs"]),
                run("*text*", &["hljs", "hljs-emphasis"]),
                run(" & more", &["hljs"]),
            ]
        );
    }

    #[test]
    fn test_renderer_none() {
        let facade = MarkdownRenderFacade::new(|_: &str| -> Option<String> { None });
        assert_eq!(facade.render("# x"), None);
    }

    #[test]
    fn test_renderer_undefined_sentinel() {
        let facade = MarkdownRenderFacade::new(fixed("undefined"));
        assert_eq!(facade.render("# x"), None);
    }

    #[test]
    fn test_sentinel_is_exact_match() {
        let facade = MarkdownRenderFacade::new(fixed("undefined "));
        let doc = facade.render("x").unwrap();
        assert_eq!(doc.text(), "undefined ");
    }

    #[test]
    fn test_empty_output_is_empty_document() {
        let facade = MarkdownRenderFacade::new(fixed(""));
        let doc = facade.render("x").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_renderer_receives_source() {
        let facade = MarkdownRenderFacade::new(|src: &str| Some(src.to_uppercase()));
        assert_eq!(facade.render("abc").unwrap().text(), "ABC");
    }

    #[test]
    fn test_custom_root_class() {
        let facade = MarkdownRenderFacade::new(fixed(r#"a<span class="k">b</span>"#))
            .with_root_class(class("code"));
        let doc = facade.render("").unwrap();
        assert_eq!(doc.runs(), [run("a", &["code"]), run("b", &["code", "k"])]);
    }

    #[test]
    fn test_custom_decoder() {
        let decoder = |entity: &str| (entity == "&star;").then_some('*');
        let facade = MarkdownRenderFacade::new(fixed("&star; &amp;")).with_decoder(decoder);
        assert_eq!(facade.render("").unwrap().text(), "* &amp;");
    }

    #[test]
    fn test_render_is_repeatable() {
        let facade = MarkdownRenderFacade::new(HighlightRenderer::new());
        let first = facade.render("**a** & b").unwrap();
        let second = facade.render("**a** & b").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_highlight_renderer_text_roundtrip() {
        let facade = MarkdownRenderFacade::new(HighlightRenderer::new());
        for source in [
            "",
            "plain",
            "# Heading\n",
            "1 < 2 && 3 > 2",
            "\"quoted\" and 'single'",
            "&amp; literally",
            "> - [x] done\n> - [ ] todo\n",
            "| a | b |\n|---|---|\n| 1 | 2 |\n",
            "日本語 **太字** ✓\n",
        ] {
            assert_eq!(facade.render(source).unwrap().text(), source, "{source:?}");
        }
    }

    #[test]
    fn test_unsupported_language_is_none() {
        let facade = MarkdownRenderFacade::new(HighlightRenderer::new().with_language("cobol"));
        assert_eq!(facade.render("# x"), None);
        assert_eq!(facade.render_themed("# x", &Theme::default()), None);
    }

    #[test]
    fn test_render_themed() {
        let facade = MarkdownRenderFacade::new(HighlightRenderer::new());
        let runs = facade.render_themed("**bold** text", &Theme::default()).unwrap();
        assert_eq!(runs[0].text, "**bold**");
        assert!(runs[0].style.is_bold());
        assert_eq!(runs[1].text, " text");
        assert!(!runs[1].style.is_bold());
    }
}
