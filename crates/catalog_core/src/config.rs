use std::fs;

use serde::Deserialize;

/// Client-side settings for reaching the catalog backend. Layered the
/// simple way: compiled defaults, then `storefront.toml` in the working
/// directory, then environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".into(),
            request_timeout_ms: 10_000,
            retry_attempts: 3,
            retry_delay_ms: 1_000,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("storefront.toml") {
        settings = settings_from_toml(&raw);
    }

    apply_env_overrides(&mut settings);
    settings
}

fn settings_from_toml(raw: &str) -> Settings {
    toml::from_str::<Settings>(raw).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring malformed storefront.toml");
        Settings::default()
    })
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(v) = std::env::var("STOREFRONT_API_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("STOREFRONT_TIMEOUT_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_ms = parsed;
        }
    }
    if let Ok(v) = std::env::var("STOREFRONT_RETRY_ATTEMPTS") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.retry_attempts = parsed;
        }
    }
    if let Ok(v) = std::env::var("STOREFRONT_RETRY_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.retry_delay_ms = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
