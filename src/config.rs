//! Runtime configuration for the Matchday server.

use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Settings {
    /// Magic-link token lifetime (seconds).
    pub magic_link_ttl: u64,
    /// Access-token lifetime (minutes).
    pub access_token_ttl: i64,
    /// Refresh-token lifetime (days).
    pub refresh_token_ttl: i64,
    /// Redis presence-key TTL (seconds).
    pub presence_ttl: u64,
}

impl Settings {
    fn from_env() -> Self {
        let magic_link_ttl = env::var("MAGIC_LINK_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(15 * 60);

        let access_token_ttl = env::var("ACCESS_TOKEN_TTL")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(15);

        let refresh_token_ttl = env::var("REFRESH_TOKEN_TTL")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(30);

        let presence_ttl = env::var("PRESENCE_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        Settings {
            magic_link_ttl,
            access_token_ttl,
            refresh_token_ttl,
            presence_ttl,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
