use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix for overrides (e.g. `ORDERDESK_BACKEND_API_KEY`)
pub const ENV_PREFIX: &str = "ORDERDESK_";

/// Variable naming the config file; not a config key itself.
pub const CONFIG_PATH_VAR: &str = "ORDERDESK_CONFIG";

/// Maps an unprefixed env key to a config path.
///
/// Only the first `_` separates the section from the field, so field names
/// keep their underscores: `BACKEND_API_KEY` becomes `backend.api_key`.
pub fn env_key_to_path(key: &str) -> String {
    key.to_ascii_lowercase().replacen('_', ".", 1)
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .ignore(&["config"])
        .map(|key| env_key_to_path(key.as_str()).into())
}

/// Load configuration from file, then apply `ORDERDESK_*` overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::new()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from a TOML string, without env overrides
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
