//! Client commands: `generate`, `status`, `history`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use prompter_client::{FileStore, HttpTransport, Orchestrator};
use prompter_config::{ClientConfig, ConfigLoader};
use tracing::debug;

use crate::cmd_serve::load_config;
use crate::presentation::{readiness_line, render_history, StatusKind, ViewState};
use crate::prompter_dir;

/// History file from config, else `~/.prompter/history.json`.
fn history_path(client: &ClientConfig) -> PathBuf {
    client
        .history_path
        .as_deref()
        .map(|p| PathBuf::from(ConfigLoader::expand_path(p)))
        .unwrap_or_else(|| prompter_dir().join("history.json"))
}

fn build_orchestrator(config_path: &Path) -> Result<Orchestrator, Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let path = history_path(&config.client);
    debug!("History store at {}", path.display());

    let transport = Arc::new(HttpTransport::new()?);
    let store = Arc::new(FileStore::new(path));
    Ok(Orchestrator::from_config(&config.client, transport, store))
}

pub(crate) async fn generate(
    config_path: &Path,
    input: &str,
    probe: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut orchestrator = build_orchestrator(config_path)?;

    if probe {
        let state = orchestrator.check_status().await;
        eprintln!("{}", readiness_line(state));
    }

    let outcome = orchestrator.generate(input).await;
    let view = ViewState::from_outcome(&outcome);
    println!("{}", view.render());

    if view.status_kind == StatusKind::Error {
        std::process::exit(1);
    }
    Ok(())
}

pub(crate) async fn status(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut orchestrator = build_orchestrator(config_path)?;
    let state = orchestrator.check_status().await;
    println!("{}", readiness_line(state));
    println!("Active relay: {}", orchestrator.endpoints().active_url());
    Ok(())
}

pub(crate) async fn history_list(
    config_path: &Path,
    full: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = build_orchestrator(config_path)?;
    let entries = orchestrator.history().list().await;
    println!("{}", render_history(&entries, full));
    Ok(())
}

pub(crate) async fn history_delete(
    config_path: &Path,
    index: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = build_orchestrator(config_path)?;
    match orchestrator.history().delete_at(index).await? {
        Some(entry) => println!("Deleted entry {}: {}", index, entry.input),
        None => println!("No history entry at index {}", index),
    }
    Ok(())
}
