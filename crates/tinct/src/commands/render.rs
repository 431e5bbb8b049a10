//! `tinct render` command implementation.

use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use tinct_config::{CliSettings, Config};
use tinct_markup::{ClassName, StyledDocument};
use tinct_renderer::{HighlightRenderer, MarkdownRenderFacade, resolve_document};

use crate::error::CliError;
use crate::terminal;

/// Output format for rendered runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Runs painted with the theme's colors.
    #[default]
    Ansi,
    /// The styled document as JSON.
    Json,
    /// One line per run: quoted text and class stack.
    Runs,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render ("-" or omitted reads stdin).
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover tinct.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in theme name (overrides config).
    #[arg(short, long, env = "TINCT_THEME")]
    theme: Option<String>,

    /// Theme file (overrides config and --theme).
    #[arg(long)]
    theme_file: Option<PathBuf>,

    /// Language hint for the highlighter (overrides config).
    #[arg(short, long)]
    language: Option<String>,

    /// Disable GitHub Flavored Markdown extensions.
    #[arg(long)]
    no_gfm: bool,

    /// Treat the input as already-highlighted span-class HTML.
    #[arg(long)]
    html: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Enable verbose output (debug logging).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input cannot be loaded, or the
    /// renderer produces no output.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            theme: self.theme,
            theme_path: self.theme_file,
            language: self.language,
            gfm: self.no_gfm.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source = read_input(self.input.as_deref())?;
        let root = ClassName::new(&config.renderer.root_class).ok_or_else(|| {
            CliError::Validation("renderer.root_class cannot be empty".to_owned())
        })?;

        let renderer = HighlightRenderer::new()
            .with_language(config.renderer.language.as_str())
            .with_gfm(config.renderer.gfm);
        let facade = MarkdownRenderFacade::new(renderer).with_root_class(root);

        let doc = if self.html {
            facade.render_html(&source)
        } else {
            facade
                .render(&source)
                .ok_or_else(|| CliError::RenderUnavailable {
                    language: config.renderer.language.clone(),
                })?
        };
        tracing::debug!(runs = doc.len(), format = ?self.format, "Rendered input");

        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        match self.format {
            OutputFormat::Ansi => {
                let theme = config.load_theme()?;
                let base = theme.resolve_style(&[config.renderer.root_class.as_str()]);
                let runs = resolve_document(&doc, &theme);
                terminal::write_runs(&mut out, &runs, base.background, console::colors_enabled())?;
                if !doc.text().ends_with('\n') {
                    writeln!(out)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &doc)?;
                writeln!(out)?;
            }
            OutputFormat::Runs => write_run_listing(&mut out, &doc)?,
        }
        out.flush()?;
        Ok(())
    }
}

/// Read the input file, or stdin for `None` and `-`.
fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Write one line per run: debug-quoted text, then the class stack.
fn write_run_listing<W: Write>(out: &mut W, doc: &StyledDocument) -> io::Result<()> {
    for run in doc {
        let classes: Vec<&str> = run.classes().iter().map(ClassName::as_str).collect();
        writeln!(out, "{:?}\t{}", run.text(), classes.join(" > "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tinct_markup::StyledRun;

    use super::*;

    fn class(name: &str) -> ClassName {
        ClassName::new(name).unwrap()
    }

    #[test]
    fn test_write_run_listing() {
        let doc = StyledDocument::from(vec![
            StyledRun::new("# Title", vec![class("hljs"), class("hljs-section")]),
            StyledRun::new("\n\"q\"", vec![class("hljs")]),
        ]);
        let mut out = Vec::new();
        write_run_listing(&mut out, &doc).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"# Title\"\thljs > hljs-section\n\"\\n\\\"q\\\"\"\thljs\n"
        );
    }

    #[test]
    fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Hello\n").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "# Hello\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(Some(&dir.path().join("missing.md"))).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_json_shape() {
        let doc = StyledDocument::from(vec![StyledRun::new(
            "a & b",
            vec![class("hljs"), class("hljs-strong")],
        )]);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "text": "a & b", "classes": ["hljs", "hljs-strong"] }])
        );
    }
}
