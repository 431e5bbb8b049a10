//! `tinct themes` command implementation.

use std::path::PathBuf;

use clap::Args;
use tinct_config::Config;
use tinct_theme::Theme;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the themes command.
#[derive(Args)]
pub(crate) struct ThemesArgs {
    /// Path to configuration file (default: auto-discover tinct.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ThemesArgs {
    /// Execute the themes command.
    ///
    /// Lists built-in themes, highlighting the one the configuration selects.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let selected = config
            .theme_resolved
            .path
            .is_none()
            .then_some(config.theme_resolved.name.as_str());

        for name in Theme::builtin_names() {
            if Some(*name) == selected {
                output.highlight(&format!("{name} (selected)"));
            } else {
                output.line(name);
            }
        }
        if let Some(path) = &config.theme_resolved.path {
            output.highlight(&format!("{} (selected)", path.display()));
        }
        Ok(())
    }
}
