use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context, Result};
use url::Url;

#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
        }
    }
}

/// Layered settings: built-in default, then `sketch.toml` (or the given
/// file), then environment variables.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();

    let raw = match config_path {
        Some(path) => Some(fs::read_to_string(path).with_context(|| {
            format!("failed to read settings file '{}'", path.display())
        })?),
        None => fs::read_to_string("sketch.toml").ok(),
    };
    if let Some(raw) = raw {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("SKETCH_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    Ok(settings)
}

pub fn validate_server_url(raw: &str) -> Result<()> {
    let parsed = Url::parse(raw).with_context(|| format!("invalid server url '{raw}'"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        bail!("server url '{raw}' must use http or https");
    }
    Ok(())
}
