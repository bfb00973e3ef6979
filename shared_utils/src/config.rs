use std::str::FromStr;

use thiserror::Error;

use crate::env::get_optional_env_var;

/// Errors related to application configuration taken from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but could not be parsed into the expected type.
    #[error("Invalid value for environment variable {name}: {value:?} ({reason})")]
    InvalidEnvVar {
        name: String,
        value: String,
        reason: String,
    },
}

/// Reads and parses an optional environment override.
///
/// Returns `Ok(None)` when the variable is unset or blank, so a layered config
/// can keep whatever value it already had.
pub fn env_override<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = get_optional_env_var(name) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw,
            reason: e.to_string(),
        })
}
