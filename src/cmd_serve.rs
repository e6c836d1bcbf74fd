//! `prompter serve`

use std::path::Path;

use prompter_api::RelayServer;
use prompter_config::{Config, ConfigLoader, ConfigValidator};
use tracing::{error, info, warn};

/// Load, validate and apply CLI overrides.
pub(crate) fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        for err in &validation.errors {
            error!("Config {}: {}", err.path, err.message);
        }
        return Err(format!("invalid configuration in {}", path.display()).into());
    }

    Ok(config)
}

/// Run the relay in the foreground until a termination signal.
pub(crate) async fn run_server(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let api_key = match config.upstream.require_api_key() {
        Ok(key) => key.to_string(),
        Err(e) => {
            error!("Cannot start relay: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting AI Prompter relay v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Upstream model: {} (key {}...)",
        config.upstream.model,
        key_prefix(&api_key)
    );

    let server = RelayServer::new(&config, &api_key)?;
    server.run().await?;
    Ok(())
}

fn key_prefix(key: &str) -> String {
    key.chars().take(4).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_key_prefix() {
        assert_eq!(key_prefix("AIzaSyExample"), "AIza");
        assert_eq!(key_prefix("ab"), "ab");
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/prompter.toml")).unwrap();
        assert_eq!(config.upstream.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[upstream]\nmodel = \"\"").unwrap();
        assert!(load_config(file.path()).is_err());
    }
}
