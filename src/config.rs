use serde::{Deserialize, Serialize};
use std::{
    env,
    fmt::{self, Display},
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:5100";
pub const CONFIG_FILE_NAME: &str = "portfolio.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(ConfigError::Invalid(format!("unknown mode '{other}'"))),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub api_url: String,
    pub dev_api_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            api_url: DEFAULT_API_URL.to_string(),
            dev_api_url: None,
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 10,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Values given on the command line. Anything set here wins over the file
/// and the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub mode: Option<Mode>,
    pub api_url: Option<String>,
    pub dev_api_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    /// Builds the effective configuration: defaults, then the YAML file,
    /// then `PORTFOLIO_*` environment variables, then `overrides`.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|key| env::var(key).ok());
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded config file");
        Self::from_yaml(&source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(source: &str) -> Result<Self, serde_yml::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(source)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yml::Error> {
        serde_yml::to_string(self)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(mode) = parse_var(&lookup, "PORTFOLIO_MODE") {
            self.mode = mode;
        }
        if let Some(url) = lookup("PORTFOLIO_API_URL") {
            self.api_url = url;
        }
        if let Some(url) = lookup("PORTFOLIO_DEV_API_URL") {
            self.dev_api_url = Some(url);
        }
        if let Some(host) = lookup("PORTFOLIO_HOST") {
            self.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORTFOLIO_PORT") {
            self.port = port;
        }
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(url) = &overrides.api_url {
            self.api_url = url.clone();
        }
        if let Some(url) = &overrides.dev_api_url {
            self.dev_api_url = Some(url.clone());
        }
        if let Some(host) = &overrides.host {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("api_url", &self.api_url)?;
        if let Some(url) = &self.dev_api_url {
            validate_url("dev_api_url", url)?;
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The backend API root for the current mode, without a trailing slash.
    /// Development prefers `dev_api_url` and falls back to `api_url`.
    pub fn backend_url(&self) -> &str {
        let url = match self.mode {
            Mode::Development => self.dev_api_url.as_deref().unwrap_or(&self.api_url),
            Mode::Production => &self.api_url,
        };
        url.trim_end_matches('/')
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("portfolio").join("config.yml"))
        .filter(|path| path.exists())
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T::Err: Display,
{
    let raw = lookup(key)?;
    raw.parse()
        .map_err(|e| {
            warn!("Invalid {key} value '{raw}': {e}, ignoring");
        })
        .ok()
}

fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{field} must start with http:// or https://, got '{url}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_backend_url_by_mode() {
        let mut config = Config {
            api_url: "https://api.example.com/".to_string(),
            dev_api_url: Some("http://localhost:5100".to_string()),
            ..Config::default()
        };
        assert_eq!(config.backend_url(), "https://api.example.com");

        config.mode = Mode::Development;
        assert_eq!(config.backend_url(), "http://localhost:5100");

        config.dev_api_url = None;
        assert_eq!(config.backend_url(), "https://api.example.com");
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = Config::from_yaml("mode: development\nport: 8080\n").unwrap();
        assert_eq!(config.mode, Mode::Development);
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_env_then_overrides() {
        let mut config = Config::default();
        config.apply_env(env_of(&[
            ("PORTFOLIO_MODE", "dev"),
            ("PORTFOLIO_API_URL", "https://prod.example.com"),
            ("PORTFOLIO_PORT", "not-a-port"),
        ]));
        assert_eq!(config.mode, Mode::Development);
        assert_eq!(config.api_url, "https://prod.example.com");
        assert_eq!(config.port, 3000);

        config.apply_overrides(&Overrides {
            port: Some(9000),
            mode: Some(Mode::Production),
            ..Overrides::default()
        });
        assert_eq!(config.port, 9000);
        assert_eq!(config.mode, Mode::Production);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config {
            api_url: "localhost:5100".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.yml");
        fs::write(&path, "api_url: https://files.example.com\nhost: 127.0.0.1\n").unwrap();

        let config = Config::load(
            Some(&path),
            &Overrides {
                host: Some("localhost".to_string()),
                ..Overrides::default()
            },
        )
        .unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.bind_addr(), "localhost:3000");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = Config::load(
            Some(Path::new("/nonexistent/portfolio.yml")),
            &Overrides::default(),
        );
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
