use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

use crate::{page::EARLIEST_MODEL_YEAR, reveal::DEFAULT_REVEAL_OFFSET_PX};

pub const SETTINGS_FILE: &str = "site.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub site_origin: String,
    pub intake_url: String,
    pub reveal_offset_px: f64,
    pub earliest_model_year: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_origin: "http://127.0.0.1:8080".into(),
            intake_url: "/".into(),
            reveal_offset_px: DEFAULT_REVEAL_OFFSET_PX,
            earliest_model_year: EARLIEST_MODEL_YEAR,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(Path::new(SETTINGS_FILE)) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Flat `key = "value"` table; unknown keys and malformed files are ignored.
pub fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("site_origin") {
        settings.site_origin = v.clone();
    }
    if let Some(v) = file_cfg.get("intake_url") {
        settings.intake_url = v.clone();
    }
    if let Some(offset) = file_cfg.get("reveal_offset_px").and_then(|v| parse_offset(v)) {
        settings.reveal_offset_px = offset;
    }
    if let Some(v) = file_cfg.get("earliest_model_year") {
        if let Ok(parsed) = v.parse::<i32>() {
            settings.earliest_model_year = parsed;
        }
    }
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SITE_ORIGIN") {
        settings.site_origin = v;
    }
    if let Some(v) = lookup("APP__SITE_ORIGIN") {
        settings.site_origin = v;
    }

    if let Some(v) = lookup("INTAKE_URL") {
        settings.intake_url = v;
    }
    if let Some(v) = lookup("APP__INTAKE_URL") {
        settings.intake_url = v;
    }

    if let Some(offset) = lookup("APP__REVEAL_OFFSET_PX").and_then(|v| parse_offset(&v)) {
        settings.reveal_offset_px = offset;
    }

    if let Some(v) = lookup("APP__EARLIEST_MODEL_YEAR") {
        if let Ok(parsed) = v.parse::<i32>() {
            settings.earliest_model_year = parsed;
        }
    }
}

// NaN or infinite offsets would keep every section hidden.
fn parse_offset(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|offset| offset.is_finite())
}

/// Resolves the configured intake endpoint, joining relative paths onto the site origin.
pub fn prepare_intake_url(site_origin: &str, raw_intake_url: &str) -> anyhow::Result<Url> {
    let raw_intake_url = raw_intake_url.trim();
    let raw_intake_url = if raw_intake_url.is_empty() {
        "/"
    } else {
        raw_intake_url
    };

    let url = if raw_intake_url.contains("://") {
        Url::parse(raw_intake_url)
            .with_context(|| format!("invalid intake url '{raw_intake_url}'"))?
    } else {
        let origin = Url::parse(site_origin.trim())
            .with_context(|| format!("invalid site origin '{site_origin}'"))?;
        origin.join(raw_intake_url).with_context(|| {
            format!("failed to resolve intake path '{raw_intake_url}' against '{origin}'")
        })?
    };

    if !matches!(url.scheme(), "http" | "https") {
        bail!("intake url '{url}' must use http or https");
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
