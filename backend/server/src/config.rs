use std::{
    env,
    fmt::{self, Debug, Display},
    fs::read_to_string,
    path::Path,
    str::FromStr,
};

use tracing::{info, warn};

use crate::error::ConfigError;

pub const DEFAULT_PORT: &str = "5000";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MAX_BODY_BYTES: &str = "10485760";

const SECRETS_DIR: &str = "/run/secrets";

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub model: String,
    pub api_base: String,
    pub api_key: String,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("RUST_PORT", DEFAULT_PORT)?,
            model: try_load("GEMINI_MODEL", DEFAULT_MODEL)?,
            api_base: try_load("GEMINI_API_BASE", DEFAULT_API_BASE)?,
            api_key: read_secret("GEMINI_API_KEY")?,
            max_body_bytes: try_load("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    parse_or_default(key, var(key), default)
}

fn parse_or_default<T: FromStr>(
    key: &str,
    value: Option<String>,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
}

/// Environment first, then the mounted secret file.
fn read_secret(secret_name: &str) -> Result<String, ConfigError> {
    secret_from(secret_name, var(secret_name), Path::new(SECRETS_DIR))
}

fn secret_from(
    secret_name: &str,
    from_env: Option<String>,
    secrets_dir: &Path,
) -> Result<String, ConfigError> {
    if let Some(secret) = from_env {
        return Ok(secret.trim().to_string());
    }

    let path = secrets_dir.join(secret_name);
    let secret = read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
            ConfigError::MissingSecret(secret_name.to_string())
        })?;

    if secret.is_empty() {
        return Err(ConfigError::MissingSecret(secret_name.to_string()));
    }

    Ok(secret)
}
