use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;
use catalog_api::Catalog;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub catalog_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3001".into(),
            catalog_path: None,
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml` values, then environment overrides.
pub fn resolve_settings(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("catalog_path") {
                    settings.catalog_path = Some(PathBuf::from(v));
                }
                if let Some(v) = file_cfg.get("log_filter") {
                    settings.log_filter = v.clone();
                }
            }
            Err(error) => warn!(%error, "ignoring malformed server.toml"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("CATALOG_PATH") {
        settings.catalog_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("APP__CATALOG_PATH") {
        settings.catalog_path = Some(PathBuf::from(v));
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }

    settings
}

pub fn load_catalog(settings: &Settings) -> anyhow::Result<Catalog> {
    match &settings.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("catalog_path '{}' could not be loaded", path.display())),
        None => {
            info!("no catalog_path configured; serving built-in catalog");
            Ok(Catalog::builtin())
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
