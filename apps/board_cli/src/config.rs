use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use storage::DEFAULT_STORAGE_KEY;

pub const DEFAULT_CONFIG_FILE: &str = "board.toml";
const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: String,
    pub storage_key: String,
    pub seed_samples: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            seed_samples: true,
        }
    }
}

/// Defaults, then `config_path` if it parses, then environment variables.
pub fn load_settings(config_path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        match raw.parse::<toml::Table>() {
            Ok(table) => apply_file(&mut settings, &table),
            Err(err) => tracing::warn!(
                path = %config_path.display(),
                error = %err,
                "ignoring unparsable config file"
            ),
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file(settings: &mut Settings, table: &toml::Table) {
    if let Some(v) = table.get("data_dir").and_then(toml::Value::as_str) {
        settings.data_dir = v.to_string();
    }
    if let Some(v) = table.get("storage_key").and_then(toml::Value::as_str) {
        settings.storage_key = v.to_string();
    }
    match table.get("seed_samples") {
        Some(toml::Value::Boolean(v)) => settings.seed_samples = *v,
        Some(toml::Value::String(v)) => {
            if let Some(parsed) = parse_flag(v) {
                settings.seed_samples = parsed;
            }
        }
        _ => {}
    }
}

/// Later names in each list win, so `APP__*` overrides the short form.
fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for name in ["BOARD_DATA_DIR", "APP__DATA_DIR"] {
        if let Some(v) = lookup(name) {
            settings.data_dir = v;
        }
    }
    for name in ["BOARD_STORAGE_KEY", "APP__STORAGE_KEY"] {
        if let Some(v) = lookup(name) {
            settings.storage_key = v;
        }
    }
    for name in ["BOARD_SEED_SAMPLES", "APP__SEED_SAMPLES"] {
        if let Some(parsed) = lookup(name).as_deref().and_then(parse_flag) {
            settings.seed_samples = parsed;
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn prepare_data_dir(raw_data_dir: &str) -> anyhow::Result<PathBuf> {
    let data_dir = normalize_data_dir(raw_data_dir);
    fs::create_dir_all(&data_dir).with_context(|| {
        format!("failed to create data directory '{}'", data_dir.display())
    })?;
    Ok(data_dir)
}

fn normalize_data_dir(raw_data_dir: &str) -> PathBuf {
    let raw_data_dir = raw_data_dir.trim();
    if raw_data_dir.is_empty() {
        return PathBuf::from(DEFAULT_DATA_DIR);
    }
    PathBuf::from(raw_data_dir)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
