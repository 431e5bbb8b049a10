//! Configuration management for tinct.
//!
//! Parses `tinct.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `theme.name`
//! - `theme.path`
//! - `renderer.language`
//! - `renderer.root_class`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tinct_theme::{Theme, ThemeError};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "tinct.toml";

const DEFAULT_THEME: &str = "github";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override built-in theme name. Clears any configured theme path.
    pub theme: Option<String>,
    /// Override theme file.
    pub theme_path: Option<PathBuf>,
    /// Override language hint.
    pub language: Option<String>,
    /// Override GFM flag.
    pub gfm: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme configuration (path is a relative string from TOML).
    theme: ThemeConfigRaw,
    /// Renderer configuration.
    pub renderer: RendererConfig,

    /// Resolved theme configuration (set after loading).
    #[serde(skip)]
    pub theme_resolved: ThemeConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw theme configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeConfigRaw {
    name: Option<String>,
    path: Option<String>,
}

/// Resolved theme configuration with an absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Built-in theme name, used when `path` is unset.
    pub name: String,
    /// Theme file; takes precedence over `name`.
    pub path: Option<PathBuf>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_owned(),
            path: None,
        }
    }
}

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Language hint passed to the highlighter.
    pub language: String,
    /// Whether GitHub Flavored Markdown is enabled.
    pub gfm: bool,
    /// Implicit outermost class of every run.
    pub root_class: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            language: "markdown".to_owned(),
            gfm: true,
            root_class: "hljs".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`theme.path`").
        field: String,
        /// Error message (e.g., "${`TINCT_THEME`} not set").
        message: String,
    },
    /// Theme loading error.
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tinct.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The final
    /// configuration is always validated, whichever source it came from.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        config.finish(cli_settings)
    }

    /// Apply CLI settings, if any, and validate the result.
    fn finish(mut self, cli_settings: Option<&CliSettings>) -> Result<Self, ConfigError> {
        if let Some(settings) = cli_settings {
            self.apply_cli_settings(settings);
        }
        self.validate()?;
        Ok(self)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(theme) = &settings.theme {
            self.theme_resolved.name.clone_from(theme);
            self.theme_resolved.path = None;
        }
        if let Some(theme_path) = &settings.theme_path {
            self.theme_resolved.path = Some(theme_path.clone());
        }
        if let Some(language) = &settings.language {
            self.renderer.language.clone_from(language);
        }
        if let Some(gfm) = settings.gfm {
            self.renderer.gfm = gfm;
        }
    }

    /// Load the theme this configuration names.
    ///
    /// A theme file takes precedence over a built-in name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Theme` if the theme file cannot be loaded, or
    /// `ConfigError::Validation` if the name is not a built-in theme.
    pub fn load_theme(&self) -> Result<Theme, ConfigError> {
        if let Some(path) = &self.theme_resolved.path {
            return Ok(Theme::load(path)?);
        }
        Theme::builtin(&self.theme_resolved.name)
            .ok_or_else(|| unknown_theme(&self.theme_resolved.name))
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_config_from(&std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_theme()?;
        self.validate_renderer()?;
        Ok(())
    }

    /// Validate theme configuration.
    fn validate_theme(&self) -> Result<(), ConfigError> {
        let theme = &self.theme_resolved;
        // A theme file carries its own name
        if theme.path.is_some() {
            return Ok(());
        }
        require_non_empty(&theme.name, "theme.name")?;
        if Theme::builtin(&theme.name).is_none() {
            return Err(unknown_theme(&theme.name));
        }
        Ok(())
    }

    /// Validate renderer configuration.
    fn validate_renderer(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.renderer.language, "renderer.language")?;
        require_non_empty(&self.renderer.root_class, "renderer.root_class")?;

        // The root class is spliced into class lists and markup
        if self
            .renderer
            .root_class
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>'))
        {
            return Err(ConfigError::Validation(
                "renderer.root_class must be a single class name".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(name) = &mut self.theme.name {
            expand::expand_in_place(name, "theme.name")?;
        }
        if let Some(path) = &mut self.theme.path {
            expand::expand_path_in_place(path, "theme.path")?;
        }
        expand::expand_in_place(&mut self.renderer.language, "renderer.language")?;
        expand::expand_in_place(&mut self.renderer.root_class, "renderer.root_class")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.theme_resolved = ThemeConfig {
            name: self
                .theme
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_THEME.to_owned()),
            path: self.theme.path.as_ref().map(|p| config_dir.join(p)),
        };
    }
}

fn unknown_theme(name: &str) -> ConfigError {
    ConfigError::Validation(format!(
        "unknown theme '{name}' (built-in themes: {})",
        Theme::builtin_names().join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme_resolved.name, "github");
        assert_eq!(config.theme_resolved.path, None);
        assert_eq!(config.renderer.language, "markdown");
        assert!(config.renderer.gfm);
        assert_eq!(config.renderer.root_class, "hljs");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.renderer, RendererConfig::default());
        assert!(config.theme.name.is_none());
    }

    #[test]
    fn test_parse_renderer_config() {
        let toml = r#"
[renderer]
language = "text"
gfm = false
root_class = "code"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.renderer.language, "text");
        assert!(!config.renderer.gfm);
        assert_eq!(config.renderer.root_class, "code");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[theme]
name = "atom-one-dark"
path = "themes/mine.toml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.theme_resolved.name, "atom-one-dark");
        assert_eq!(
            config.theme_resolved.path,
            Some(PathBuf::from("/project/themes/mine.toml"))
        );
    }

    #[test]
    fn test_resolve_paths_defaults_theme_name() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.theme_resolved, ThemeConfig::default());
    }

    #[test]
    fn test_apply_cli_settings_theme_clears_path() {
        let mut config = Config::default();
        config.theme_resolved.path = Some(PathBuf::from("/test/mine.toml"));
        config.apply_cli_settings(&CliSettings {
            theme: Some("atom-one-dark".to_owned()),
            ..Default::default()
        });

        assert_eq!(config.theme_resolved.name, "atom-one-dark");
        assert_eq!(config.theme_resolved.path, None);
    }

    #[test]
    fn test_apply_cli_settings_theme_path() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            theme_path: Some(PathBuf::from("/custom.toml")),
            ..Default::default()
        });

        assert_eq!(
            config.theme_resolved.path,
            Some(PathBuf::from("/custom.toml"))
        );
        assert_eq!(config.theme_resolved.name, "github"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_renderer() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            language: Some("text".to_owned()),
            gfm: Some(false),
            ..Default::default()
        });

        assert_eq!(config.renderer.language, "text");
        assert!(!config.renderer.gfm);
        assert_eq!(config.renderer.root_class, "hljs"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.theme_resolved, ThemeConfig::default());
        assert_eq!(config.renderer, RendererConfig::default());
    }

    #[test]
    fn test_validate_default_config_passes() {
        Config::default()
            .validate()
            .unwrap();
    }

    #[test]
    fn test_validate_unknown_theme() {
        let mut config = Config::default();
        config.theme_resolved.name = "solarized".to_owned();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        let message = err.to_string();
        assert!(message.contains("solarized"), "{message}");
        assert!(message.contains("atom-one-dark"), "{message}");
    }

    #[test]
    fn test_validate_theme_name_ignored_with_path() {
        let mut config = Config::default();
        config.theme_resolved.name = "custom".to_owned();
        config.theme_resolved.path = Some(PathBuf::from("/test/custom.toml"));
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_empty_theme_name() {
        let mut config = Config::default();
        config.theme_resolved.name = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("theme.name"));
    }

    #[test]
    fn test_validate_empty_language() {
        let mut config = Config::default();
        config.renderer.language = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("renderer.language"));
    }

    #[test]
    fn test_validate_root_class() {
        for bad in ["", "two words", "q\"uote", "<x>"] {
            let mut config = Config::default();
            config.renderer.root_class = bad.to_owned();
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("renderer.root_class"), "{bad:?}");
        }
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: the variable names are unique to this test
        unsafe {
            std::env::set_var("TINCT_CFG_THEME", "atom-one-dark");
            std::env::set_var("TINCT_CFG_LANG", "md");
        }
        let toml = r#"
[theme]
name = "${TINCT_CFG_THEME}"

[renderer]
language = "${TINCT_CFG_LANG}"
root_class = "${TINCT_CFG_ROOT:-hljs}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.theme.name.as_deref(), Some("atom-one-dark"));
        assert_eq!(config.renderer.language, "md");
        assert_eq!(config.renderer.root_class, "hljs");
        unsafe {
            std::env::remove_var("TINCT_CFG_THEME");
            std::env::remove_var("TINCT_CFG_LANG");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("TINCT_CFG_MISSING");
        }
        let toml = r#"
[theme]
path = "${TINCT_CFG_MISSING}/theme.toml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();
        assert!(
            matches!(err, ConfigError::EnvVar { ref field, .. } if field == "theme.path"),
            "Expected EnvVar, got {err:?}"
        );
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[theme]\nname = \"atom-one-dark\"\n\n[renderer]\ngfm = false\n",
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.theme_resolved.name, "atom-one-dark");
        assert!(!config.renderer.gfm);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(ref p) if *p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[renderer\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_unknown_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[theme]\nname = \"nope\"\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_validates_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let settings = CliSettings {
            theme: Some("nope".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_finish_validates_without_cli_settings() {
        let mut config = Config::default();
        config.renderer.root_class = "a b".to_owned();
        let err = config.finish(None).unwrap_err();
        assert!(err.to_string().contains("renderer.root_class"), "{err}");
    }

    #[test]
    fn test_finish_applies_cli_settings_then_validates() {
        let settings = CliSettings {
            language: Some("text".to_owned()),
            ..Default::default()
        };
        let config = Config::default().finish(Some(&settings)).unwrap();
        assert_eq!(config.renderer.language, "text");

        let settings = CliSettings {
            language: Some("  ".to_owned()),
            ..Default::default()
        };
        assert!(Config::default().finish(Some(&settings)).is_err());
    }

    #[test]
    fn test_expand_env_vars_tilde_theme_path() {
        let Some(home) = std::env::var_os("HOME") else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[theme]\npath = \"~/themes/dark.toml\"\n");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(
            config.theme_resolved.path,
            Some(PathBuf::from(home).join("themes/dark.toml"))
        );
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config_from(&nested), Some(path));
    }

    #[test]
    fn test_load_theme_builtin() {
        let config = Config::default();
        assert_eq!(config.load_theme().unwrap().name(), "github");
    }

    #[test]
    fn test_load_theme_from_file_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("themes")).unwrap();
        std::fs::write(
            dir.path().join("themes/mine.toml"),
            "name = \"mine\"\n[classes.hljs]\nforeground = \"#123456\"\n",
        )
        .unwrap();
        let path = write_config(dir.path(), "[theme]\npath = \"themes/mine.toml\"\n");

        let config = Config::load(Some(&path), None).unwrap();
        let theme = config.load_theme().unwrap();
        assert_eq!(theme.name(), "mine");
        assert_eq!(theme.len(), 1);
    }

    #[test]
    fn test_load_theme_missing_file() {
        let mut config = Config::default();
        config.theme_resolved.path = Some(PathBuf::from("/nonexistent/theme.toml"));
        let err = config.load_theme().unwrap_err();
        assert!(matches!(err, ConfigError::Theme(ThemeError::Io(_))));
    }
}
