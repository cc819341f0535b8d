use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const USER_VAR: &str = "HY_USER";
pub const TOKEN_VAR: &str = "HY_TOKEN";
pub const AGENT_ID_VAR: &str = "HY_AGENT_ID";
pub const CHAT_ID_VAR: &str = "HY_CHAT_ID";
pub const SOURCE_VAR: &str = "HY_SOURCE";
pub const BASE_URL_VAR: &str = "HY_BASE_URL";
pub const OUTPUT_DIR_VAR: &str = "CAPTURE_OUTPUT_DIR";
pub const FILENAME_FORMAT_VAR: &str = "CAPTURE_FILENAME_FORMAT";
pub const TIMESTAMP_FORMAT_VAR: &str = "CAPTURE_TIMESTAMP_FORMAT";
pub const MAX_QUERY_LENGTH_VAR: &str = "CAPTURE_MAX_QUERY_LENGTH";

const DEFAULT_BASE_URL: &str = "http://localhost:8002/v1";
const DEFAULT_AGENT_ID: &str = "naQivTmsDa";
const DEFAULT_SOURCE: &str = "web";

/// Identity sent along with every chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub token: String,
    pub agent_id: String,
    /// Empty means the server creates a fresh conversation.
    pub chat_id: String,
    pub source: String,
}

/// Controls where intermediate capture files land and how they are named.
///
/// Only path generation reads these values; extraction never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNamingConfig {
    pub output_dir: PathBuf,
    /// Template with `{model}`, `{timestamp}` and `{query_hash}` placeholders.
    pub filename_format: String,
    /// chrono `strftime` pattern.
    pub timestamp_format: String,
    pub max_query_length: usize,
}

impl Default for FileNamingConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            filename_format: "{model}_{timestamp}_{query_hash}.txt".to_string(),
            timestamp_format: "%Y%m%d_%H%M%S".to_string(),
            max_query_length: 50,
        }
    }
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub base_url: String,
    pub identity: Identity,
    pub naming: FileNamingConfig,
}

impl RunConfig {
    /// Load `.env` (if present) and resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; real environment variables still apply.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let identity = Identity {
            user: require(USER_VAR)?,
            token: require(TOKEN_VAR)?,
            agent_id: get(AGENT_ID_VAR).unwrap_or_else(|| DEFAULT_AGENT_ID.to_string()),
            chat_id: get(CHAT_ID_VAR).unwrap_or_default(),
            source: get(SOURCE_VAR).unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        };

        let mut naming = FileNamingConfig::default();
        if let Some(dir) = get(OUTPUT_DIR_VAR) {
            naming.output_dir = PathBuf::from(dir);
        }
        if let Some(format) = get(FILENAME_FORMAT_VAR) {
            naming.filename_format = format;
        }
        if let Some(format) = get(TIMESTAMP_FORMAT_VAR) {
            naming.timestamp_format = format;
        }
        if let Some(raw) = get(MAX_QUERY_LENGTH_VAR) {
            naming.max_query_length = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: MAX_QUERY_LENGTH_VAR,
                value: raw.clone(),
            })?;
        }

        let base_url = get(BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self { base_url, identity, naming })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.naming.output_dir = dir.into();
        self
    }
}
