// Configuration loading and parsing (nextplay.toml, credentials.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Local development server used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable that overrides `[api] base_url`.
pub const ENV_API_URL: &str = "NEXTPLAY_API_URL";

/// Environment variable that supplies the bearer token.
pub const ENV_API_TOKEN: &str = "NEXTPLAY_API_TOKEN";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub api: ApiConfig,
    pub workflow: WorkflowConfig,
    pub credentials: CredentialsConfig,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// nextplay.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for nextplay.toml. Every section is optional.
#[derive(Debug, Clone, Deserialize, Default)]
struct SettingsFile {
    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    workflow: WorkflowConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the stats service; endpoints live under `<base_url>/api/`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// How many past games the recent-games panel shows.
    pub recent_games: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        WorkflowConfig {
            recent_games: crate::history::RECENT_GAMES,
        }
    }
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct CredentialsConfig {
    /// Sent as `Authorization: Bearer <token>` when present.
    pub api_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `nextplay.toml` and (optionally)
/// `credentials.toml` inside `config_dir`.
///
/// Missing files fall back to defaults. Environment overrides are not applied
/// here; see [`apply_env_overrides`].
pub fn load_config_from(config_dir: &Path) -> Result<Config, ConfigError> {
    let settings_path = config_dir.join("nextplay.toml");
    let settings: SettingsFile = read_optional_toml(&settings_path)?.unwrap_or_default();

    let credentials_path = config_dir.join("credentials.toml");
    let credentials: CredentialsConfig =
        read_optional_toml(&credentials_path)?.unwrap_or_default();

    let config = Config {
        api: settings.api,
        workflow: settings.workflow,
        credentials,
    };

    validate(&config)?;
    Ok(config)
}

/// Apply `NEXTPLAY_API_URL` / `NEXTPLAY_API_TOKEN` on top of file settings.
///
/// Takes a lookup function so tests do not have to mutate the process
/// environment.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
        config.credentials.api_token = Some(token.trim().to_string());
    }
    validate(config)
}

/// The directory config files are read from: `./config` when it exists,
/// otherwise the platform config directory.
pub fn config_dir(cwd: &Path) -> PathBuf {
    let local = cwd.join("config");
    if local.is_dir() {
        return local;
    }
    directories::ProjectDirs::from("", "", "nextplay")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or(local)
}

/// Convenience wrapper: resolves the config directory relative to the current
/// working directory, loads it, and applies environment overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::ReadError {
        path: PathBuf::from("."),
        source: e,
    })?;
    let mut config = load_config_from(&config_dir(&cwd))?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_optional_toml<T>(path: &Path) -> Result<Option<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text)
        .map(Some)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = config.api.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must start with http:// or https://, got {url:?}"),
        });
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "api.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.workflow.recent_games == 0 {
        return Err(ConfigError::ValidationError {
            field: "workflow.recent_games".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn temp_config_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nextplay_config_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_files_give_defaults() {
        let dir = temp_config_dir("empty");
        let config = load_config_from(&dir).expect("defaults should load");
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.workflow.recent_games, 10);
        assert!(config.credentials.api_token.is_none());
    }

    #[test]
    fn settings_file_overrides_defaults() {
        let dir = temp_config_dir("settings");
        fs::write(
            dir.join("nextplay.toml"),
            "[api]\nbase_url = \"https://stats.example.test\"\ntimeout_secs = 3\n",
        )
        .unwrap();
        let config = load_config_from(&dir).unwrap();
        assert_eq!(config.api.base_url, "https://stats.example.test");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        // Section not present in the file keeps its defaults.
        assert_eq!(config.workflow.recent_games, 10);
    }

    #[test]
    fn credentials_file_supplies_token() {
        let dir = temp_config_dir("creds");
        fs::write(dir.join("credentials.toml"), "api_token = \"abc123\"\n").unwrap();
        let config = load_config_from(&dir).unwrap();
        assert_eq!(config.credentials.api_token.as_deref(), Some("abc123"));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let dir = temp_config_dir("broken");
        fs::write(dir.join("nextplay.toml"), "[api\nbase_url = ").unwrap();
        let err = load_config_from(&dir).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let dir = temp_config_dir("bad_url");
        fs::write(dir.join("nextplay.toml"), "[api]\nbase_url = \"localhost:8000\"\n").unwrap();
        match load_config_from(&dir).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "api.base_url"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_recent_games_is_rejected() {
        let dir = temp_config_dir("zero_games");
        fs::write(dir.join("nextplay.toml"), "[workflow]\nrecent_games = 0\n").unwrap();
        assert!(matches!(
            load_config_from(&dir),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn env_overrides_take_precedence() {
        let mut config = Config::default();
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "https://prod.example.test"),
            (ENV_API_TOKEN, " secret "),
        ]
        .into_iter()
        .collect();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.api.base_url, "https://prod.example.test");
        assert_eq!(config.credentials.api_token.as_deref(), Some("secret"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |_| Some("  ".to_string())).unwrap();
        assert_eq!(config, Config::default());
    }
}
