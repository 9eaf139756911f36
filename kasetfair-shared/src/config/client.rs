use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SAVE_DELAY_MS: u64 = 250;

/// Configuration for the Kaset Fair registration client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the store API; endpoint paths are appended to it
    pub api_base_url: Url,

    /// Logging level or `tracing` filter directive
    pub log_level: String,

    /// File backing the draft cache; the platform config dir when unset
    #[serde(default)]
    pub draft_store_path: Option<PathBuf>,

    /// Cookie jar holding the authenticated session
    #[serde(default)]
    pub cookie_jar_path: Option<PathBuf>,

    /// Delay used by wizard steps whose persistence is simulated
    #[serde(default = "default_save_delay_ms")]
    pub simulated_save_delay_ms: u64,
}

const fn default_save_delay_ms() -> u64 {
    DEFAULT_SAVE_DELAY_MS
}

/// Values supplied on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<Url>,
    pub log_level: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates a default configuration.
    ///
    /// # Panics
    /// Never; the built-in base URL is a valid literal.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default API URL is valid"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            draft_store_path: None,
            cookie_jar_path: None,
            simulated_save_delay_ms: DEFAULT_SAVE_DELAY_MS,
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// Environment variables only apply to values the file left at their
    /// default; command-line overrides apply last.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, if an
    /// environment value is malformed, or if the result fails validation.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_config(
        config_path: Option<PathBuf>,
        overrides: ConfigOverrides,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::with_defaults();
        let defaults = Self::with_defaults();

        if let Some(path) = config_path {
            let content = fs::read_to_string(&path)?;
            config = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => toml::from_str(&content)?,
                Some("json") => serde_json::from_str(&content)?,
                _ => return Err("Unsupported configuration format. Use 'toml' or 'json'.".into()),
            };
        }

        if config.api_base_url == defaults.api_base_url {
            if let Ok(url) = env::var("KASETFAIR_API_URL") {
                config.api_base_url = Url::parse(&url)
                    .map_err(|_| "Invalid KASETFAIR_API_URL value: must be an absolute URL")?;
            }
        }
        if config.log_level == defaults.log_level {
            if let Ok(level) = env::var("KASETFAIR_LOG_LEVEL") {
                config.log_level = level;
            }
        }
        if config.draft_store_path.is_none() {
            if let Ok(path) = env::var("KASETFAIR_DRAFT_STORE") {
                config.draft_store_path = Some(PathBuf::from(path));
            }
        }
        if config.cookie_jar_path.is_none() {
            if let Ok(path) = env::var("KASETFAIR_COOKIE_JAR") {
                config.cookie_jar_path = Some(PathBuf::from(path));
            }
        }
        if config.simulated_save_delay_ms == defaults.simulated_save_delay_ms {
            if let Ok(delay) = env::var("KASETFAIR_SAVE_DELAY_MS") {
                config.simulated_save_delay_ms = delay
                    .parse()
                    .map_err(|_| "Invalid KASETFAIR_SAVE_DELAY_MS value: must be milliseconds")?;
            }
        }

        if let Some(url) = overrides.api_base_url {
            config.api_base_url = url;
        }
        if let Some(level) = overrides.log_level {
            config.log_level = level;
        }

        if let Err(errors) = config.validate() {
            return Err(errors.join("; ").into());
        }

        Ok(config)
    }

    /// Resolves an API path against the base URL, keeping the base path prefix.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Draft cache file, falling back to the platform config directory.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn resolved_draft_store_path(&self) -> PathBuf {
        self.draft_store_path.clone().unwrap_or_else(|| {
            directories::BaseDirs::new().map_or_else(
                || PathBuf::from("./kasetfair-drafts.json"),
                |dirs| dirs.config_dir().join("kasetfair").join("drafts.json"),
            )
        })
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !matches!(self.api_base_url.scheme(), "http" | "https") {
            errors.push(format!(
                "Unsupported API URL scheme '{}'. Use http or https.",
                self.api_base_url.scheme()
            ));
        }

        if self.log_level.trim().is_empty() {
            errors.push("Log level must not be empty.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn cleanup_env_vars() {
        unsafe {
            env::remove_var("KASETFAIR_API_URL");
            env::remove_var("KASETFAIR_LOG_LEVEL");
            env::remove_var("KASETFAIR_DRAFT_STORE");
            env::remove_var("KASETFAIR_COOKIE_JAR");
            env::remove_var("KASETFAIR_SAVE_DELAY_MS");
        }
    }

    #[test]
    #[serial]
    fn test_config_with_defaults() {
        cleanup_env_vars();
        let config = ClientConfig::with_defaults();

        assert_eq!(config.api_base_url.as_str(), "http://localhost:8000/api");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.draft_store_path, None);
        assert_eq!(config.simulated_save_delay_ms, 250);
    }

    #[test]
    #[serial]
    fn test_load_config_without_file_uses_defaults() {
        cleanup_env_vars();
        let config = ClientConfig::load_config(None, ConfigOverrides::default()).unwrap();
        assert_eq!(config, ClientConfig::with_defaults());
    }

    #[test]
    #[serial]
    fn test_load_config_with_environment_variables() {
        cleanup_env_vars();
        unsafe {
            env::set_var("KASETFAIR_API_URL", "https://fair.example.org/api");
            env::set_var("KASETFAIR_LOG_LEVEL", "debug");
            env::set_var("KASETFAIR_DRAFT_STORE", "/tmp/drafts.json");
            env::set_var("KASETFAIR_SAVE_DELAY_MS", "0");
        }

        let config = ClientConfig::load_config(None, ConfigOverrides::default()).unwrap();
        cleanup_env_vars();

        assert_eq!(config.api_base_url.as_str(), "https://fair.example.org/api");
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.draft_store_path,
            Some(PathBuf::from("/tmp/drafts.json"))
        );
        assert_eq!(config.simulated_save_delay_ms, 0);
    }

    #[test]
    #[serial]
    fn test_overrides_beat_environment() {
        cleanup_env_vars();
        unsafe {
            env::set_var("KASETFAIR_LOG_LEVEL", "debug");
        }

        let overrides = ConfigOverrides {
            api_base_url: Some(Url::parse("https://override.example.org/").unwrap()),
            log_level: Some("warn".to_string()),
        };
        let config = ClientConfig::load_config(None, overrides).unwrap();
        cleanup_env_vars();

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.api_base_url.as_str(), "https://override.example.org/");
    }

    #[test]
    #[serial]
    fn test_invalid_environment_values_are_rejected() {
        cleanup_env_vars();
        unsafe {
            env::set_var("KASETFAIR_SAVE_DELAY_MS", "soon");
        }
        let result = ClientConfig::load_config(None, ConfigOverrides::default());
        cleanup_env_vars();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("KASETFAIR_SAVE_DELAY_MS"));
    }

    #[test]
    #[serial]
    fn test_load_config_from_toml_file() -> Result<(), Box<dyn std::error::Error>> {
        cleanup_env_vars();
        let dir = TempDir::new()?;
        let path = dir.path().join("kasetfair.toml");
        fs::write(
            &path,
            r#"
api_base_url = "https://fair.ku.th/api"
log_level = "trace"
cookie_jar_path = "/home/me/.kasetfair/cookies"
"#,
        )?;

        let config = ClientConfig::load_config(Some(path), ConfigOverrides::default())?;
        assert_eq!(config.api_base_url.as_str(), "https://fair.ku.th/api");
        assert_eq!(config.log_level, "trace");
        assert_eq!(
            config.cookie_jar_path,
            Some(PathBuf::from("/home/me/.kasetfair/cookies"))
        );
        assert_eq!(config.simulated_save_delay_ms, 250);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_config_from_json_file() -> Result<(), Box<dyn std::error::Error>> {
        cleanup_env_vars();
        let dir = TempDir::new()?;
        let path = dir.path().join("kasetfair.json");
        fs::write(
            &path,
            r#"{"api_base_url":"http://127.0.0.1:9000/","log_level":"info","simulated_save_delay_ms":10}"#,
        )?;

        let config = ClientConfig::load_config(Some(path), ConfigOverrides::default())?;
        assert_eq!(config.api_base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.simulated_save_delay_ms, 10);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_config_unsupported_format() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kasetfair.ini");
        fs::write(&path, "api_base_url=x").unwrap();

        let err = ClientConfig::load_config(Some(path), ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("Unsupported configuration format"));
    }

    #[test]
    #[serial]
    fn test_load_config_nonexistent_file() {
        cleanup_env_vars();
        let result = ClientConfig::load_config(
            Some(PathBuf::from("/definitely/not/here.toml")),
            ConfigOverrides::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = ClientConfig {
            api_base_url: Url::parse("ftp://fair.ku.th/").unwrap(),
            ..ClientConfig::with_defaults()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("ftp"));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = ClientConfig::with_defaults();
        assert_eq!(
            config.endpoint("/store/status"),
            "http://localhost:8000/api/store/status"
        );
        assert_eq!(
            config.endpoint("store/goods/g-1"),
            "http://localhost:8000/api/store/goods/g-1"
        );
    }

    #[test]
    fn test_resolved_draft_store_path_prefers_explicit_value() {
        let config = ClientConfig {
            draft_store_path: Some(PathBuf::from("/tmp/custom.json")),
            ..ClientConfig::with_defaults()
        };
        assert_eq!(
            config.resolved_draft_store_path(),
            PathBuf::from("/tmp/custom.json")
        );
    }
}
