//! Environment variable expansion for configuration fields.
//!
//! String fields accept `${VAR}` and `${VAR:-default}`. Path fields also
//! accept a leading `~` for the home directory.

use std::env::VarError;

use crate::ConfigError;

/// Failed lookup of one variable.
struct VarLookup {
    name: String,
    error: VarError,
}

impl VarLookup {
    fn into_config_error(self, field: &str) -> ConfigError {
        let message = match self.error {
            VarError::NotPresent => format!("${{{}}} not set", self.name),
            VarError::NotUnicode(_) => format!("${{{}}} is not valid UTF-8", self.name),
        };
        ConfigError::EnvVar {
            field: field.to_owned(),
            message,
        }
    }
}

fn lookup(var: &str) -> Result<Option<String>, VarLookup> {
    std::env::var(var).map(Some).map_err(|error| VarLookup {
        name: var.to_owned(),
        error,
    })
}

/// Expand variable references in a string field in place.
///
/// Values without `${` are left untouched, so a literal `$` survives.
pub(crate) fn expand_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if !value.contains("${") {
        return Ok(());
    }
    let expanded = shellexpand::env_with_context(value.as_str(), lookup)
        .map_err(|e| e.cause.into_config_error(field))?
        .into_owned();
    tracing::trace!(field, "Expanded environment variables");
    *value = expanded;
    Ok(())
}

/// Expand variable references and a leading `~` in a path field in place.
pub(crate) fn expand_path_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if !value.contains("${") && !value.starts_with('~') {
        return Ok(());
    }
    let home = || std::env::var("HOME").ok();
    let expanded = shellexpand::full_with_context(value.as_str(), home, lookup)
        .map_err(|e| e.cause.into_config_error(field))?
        .into_owned();
    tracing::trace!(field, "Expanded path");
    *value = expanded;
    Ok(())
}
