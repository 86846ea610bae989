use crate::api::{DashboardId, DashboardState, ServerConfig};
use serde::{Deserialize, Serialize};
use tracing::Level;

pub const TOAST_DISMISS_MS: u64 = 4_000;

const DEFAULT_SERVER_URL: &str = "http://localhost:8088";

/// Labels and email templates for the share menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareMenuText {
    pub copy_menu_item_title: String,
    pub copy_public_link_title: String,
    pub email_menu_item_title: String,
    pub email_subject: String,
    pub email_body: String,
}

impl Default for ShareMenuText {
    fn default() -> Self {
        Self {
            copy_menu_item_title: "Copy permalink to clipboard".to_string(),
            copy_public_link_title: "Copy public link".to_string(),
            email_menu_item_title: "Share permalink by email".to_string(),
            email_subject: "Superset dashboard".to_string(),
            email_body: "Check out this dashboard: ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub id: DashboardId,
    pub title: String,
    pub state: DashboardState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
    pub menu: ShareMenuText,
}

/// Parse a dashboard id the way routes carry it: digits are numeric ids,
/// anything else is a slug.
pub fn parse_dashboard_id(raw: &str) -> Option<DashboardId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(match trimmed.parse::<i64>() {
        Ok(id) => DashboardId::Number(id),
        Err(_) => DashboardId::Text(trimmed.to_string()),
    })
}

pub fn parse_dashboard_state(raw: &str) -> Result<DashboardState, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid dashboard state: {e}"))
}

pub fn parse_log_level(raw: &str) -> Option<Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Build the config from already-looked-up values. Missing or invalid
/// entries fall back to defaults.
pub fn config_from_lookup<F>(lookup: F, fallback_origin: Option<String>) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let server_url = lookup("DASHSHARE_SERVER_URL")
        .filter(|url| !url.trim().is_empty())
        .or(fallback_origin)
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let mut server = ServerConfig::new(server_url);
    server.access_token = lookup("DASHSHARE_ACCESS_TOKEN").filter(|v| !v.is_empty());
    server.csrf_token = lookup("DASHSHARE_CSRF_TOKEN").filter(|v| !v.is_empty());

    let id = lookup("DASHSHARE_DASHBOARD_ID")
        .and_then(|raw| parse_dashboard_id(&raw))
        .unwrap_or(DashboardId::Number(1));
    let title = lookup("DASHSHARE_DASHBOARD_TITLE")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| format!("Dashboard {id}"));
    let state = match lookup("DASHSHARE_DASHBOARD_STATE") {
        Some(raw) => parse_dashboard_state(&raw).unwrap_or_else(|err| {
            tracing::warn!("{err}; starting with an empty view");
            DashboardState::default()
        }),
        None => DashboardState::default(),
    };

    AppConfig {
        server,
        dashboard: DashboardConfig { id, title, state },
        menu: ShareMenuText::default(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_level() -> Level {
    std::env::var("DASHSHARE_LOG")
        .ok()
        .and_then(|raw| parse_log_level(&raw))
        .unwrap_or(Level::INFO)
}

#[cfg(target_arch = "wasm32")]
pub fn log_level() -> Level {
    Level::INFO
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> AppConfig {
    config_from_lookup(|key| std::env::var(key).ok(), None)
}

/// Decoded value of `name` in a `?a=1&b=2` query string.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}

/// Maps the page query onto config keys: `dashboard` is the dashboard id
/// and `state` a URL-encoded dashboard state JSON.
pub fn query_lookup(search: &str, key: &str) -> Option<String> {
    match key {
        "DASHSHARE_DASHBOARD_ID" => query_param(search, "dashboard"),
        "DASHSHARE_DASHBOARD_TITLE" => query_param(search, "title"),
        "DASHSHARE_DASHBOARD_STATE" => query_param(search, "state"),
        _ => None,
    }
}

/// On web the backend is the page's own origin; the dashboard comes from
/// the page query.
#[cfg(target_arch = "wasm32")]
pub fn load_config() -> AppConfig {
    let location = web_sys::window().map(|window| window.location());
    let origin = location.as_ref().and_then(|l| l.origin().ok());
    let search = location
        .as_ref()
        .and_then(|l| l.search().ok())
        .unwrap_or_default();

    config_from_lookup(|key| query_lookup(&search, key), origin)
}
