//! Configuration loader.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::schema::Config;

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the relay port.
pub const PORT_ENV: &str = "PORT";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults.
    /// Environment overrides are applied either way.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        let mut config = if path.exists() {
            debug!("Loading config from {}", path.display());
            Self::load(path)?
        } else {
            debug!("No config at {}, using defaults", path.display());
            Config::default()
        };
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Apply `PORT` and `GEMINI_API_KEY` from the process environment.
    pub fn apply_env_overrides(config: &mut Config) {
        Self::apply_overrides_from(config, |name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(PORT_ENV) {
            match raw.trim().parse::<u16>() {
                Ok(port) if port > 0 => config.server.port = port,
                _ => warn!(
                    "Invalid {}='{}', keeping port {}",
                    PORT_ENV, raw, config.server.port
                ),
            }
        }

        if let Some(key) = lookup(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.upstream.api_key = Some(key);
            }
        }
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.prompter`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_sections() {
        let content = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [upstream]
            model = "gemini-pro"
            timeout_seconds = 10

            [cors]
            mode = "extension"

            [client]
            history_limit = 50
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.model, "gemini-pro");
        assert_eq!(config.upstream.timeout_seconds, 10);
        assert_eq!(config.upstream.temperature, 0.7);
        assert_eq!(config.cors.mode, crate::CorsMode::Extension);
        assert_eq!(config.client.history_limit, 50);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "port = 7000").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/prompter.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/prompter.toml")).unwrap();
        assert_eq!(config.upstream.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_PROMPTER_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(&mut config, lookup(&[("PORT", "8123")]));
        assert_eq!(config.server.port, 8123);
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(&mut config, lookup(&[("PORT", "not-a-port")]));
        assert_eq!(config.server.port, 5000);

        ConfigLoader::apply_overrides_from(&mut config, lookup(&[("PORT", "0")]));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_api_key_override() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(&mut config, lookup(&[("GEMINI_API_KEY", "secret")]));
        assert_eq!(config.upstream.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_blank_api_key_does_not_override() {
        let mut config = Config::default();
        config.upstream.api_key = Some("from-file".to_string());
        ConfigLoader::apply_overrides_from(&mut config, lookup(&[("GEMINI_API_KEY", "")]));
        assert_eq!(config.upstream.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/test");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/test"));
    }
}
