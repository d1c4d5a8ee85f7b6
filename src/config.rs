use crate::icons::IconTheme;
use std::{env, net::IpAddr, net::SocketAddr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CLIENT_ID: &str = "CLT_DEMO_01";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub api_base_url: String,
    pub icon_theme: IconTheme,
    pub default_client_id: String,
    pub expand_active: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Missing or malformed values fall back to defaults. An unknown icon
    /// theme is rejected so a typo cannot silently change the look.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!("ignoring invalid PORT '{value}'");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let host = match lookup("VECTOR_BIND_HOST") {
            Some(value) => value.trim().parse::<IpAddr>().unwrap_or_else(|_| {
                warn!("ignoring invalid VECTOR_BIND_HOST '{value}'");
                IpAddr::from([127, 0, 0, 1])
            }),
            None => IpAddr::from([127, 0, 0, 1]),
        };

        let api_base_url = lookup("VECTOR_API_BASE_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| format!("http://127.0.0.1:{DEFAULT_PORT}"));

        let icon_theme = match lookup("VECTOR_ICON_THEME") {
            Some(value) => value.parse::<IconTheme>()?,
            None => IconTheme::default(),
        };

        let default_client_id = lookup("VECTOR_DEFAULT_CLIENT")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());

        let expand_active = lookup("VECTOR_EXPAND_ACTIVE")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            api_base_url,
            icon_theme,
            default_client_id,
            expand_active,
        })
    }
}
