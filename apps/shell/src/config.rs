use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use shared::{domain::Route, error::RouteTableError};
use view_core::RouteTable;

const DEFAULT_CONFIG_FILE: &str = "shell.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteSettings {
    pub key: String,
    pub title: Option<String>,
    pub content_id: Option<String>,
}

impl RouteSettings {
    fn named(key: &str) -> Self {
        Self {
            key: key.to_string(),
            title: None,
            content_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_route: String,
    pub title_prefix: String,
    pub notification_ttl_secs: u64,
    pub content_latency_ms: u64,
    pub contact_delay_ms: u64,
    pub routes: Vec<RouteSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_route: "home".into(),
            title_prefix: "Portfolio".into(),
            notification_ttl_secs: 5,
            content_latency_ms: 0,
            contact_delay_ms: 2000,
            routes: ["home", "profile", "experience", "connect"]
                .into_iter()
                .map(RouteSettings::named)
                .collect(),
        }
    }
}

impl Settings {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_secs)
    }

    pub fn content_latency(&self) -> Duration {
        Duration::from_millis(self.content_latency_ms)
    }

    pub fn contact_delay(&self) -> Duration {
        Duration::from_millis(self.contact_delay_ms)
    }

    /// Routes with titles and content ids filled in. A missing title becomes
    /// `"<prefix> - <Key>"`, a missing content id reuses the key.
    pub fn resolved_routes(&self) -> Vec<Route> {
        self.routes
            .iter()
            .map(|route| {
                let title = route
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("{} - {}", self.title_prefix, capitalize(&route.key)));
                let content_id = route.content_id.clone().unwrap_or_else(|| route.key.clone());
                Route::new(route.key.as_str(), title, content_id)
            })
            .collect()
    }

    pub fn route_table(&self) -> Result<RouteTable, RouteTableError> {
        RouteTable::new(self.resolved_routes(), self.default_route.as_str())
    }
}

/// Defaults, then `shell.toml` (or the explicit `path`), then `APP__*`
/// environment overrides.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match path {
        Some(path) => read_settings_file(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_settings_file(&default_path)?
            } else {
                Settings::default()
            }
        }
    };
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read shell config '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse shell config '{}'", path.display()))
}

/// Overlays environment values; unparsable numbers keep the current value.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__DEFAULT_ROUTE") {
        settings.default_route = v;
    }
    if let Some(v) = lookup("APP__TITLE_PREFIX") {
        settings.title_prefix = v;
    }
    if let Some(parsed) = lookup("APP__NOTIFICATION_TTL_SECS").and_then(|v| v.parse().ok()) {
        settings.notification_ttl_secs = parsed;
    }
    if let Some(parsed) = lookup("APP__CONTENT_LATENCY_MS").and_then(|v| v.parse().ok()) {
        settings.content_latency_ms = parsed;
    }
    if let Some(parsed) = lookup("APP__CONTACT_DELAY_MS").and_then(|v| v.parse().ok()) {
        settings.contact_delay_ms = parsed;
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
