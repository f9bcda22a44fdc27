use std::env;
use tracing::warn;

pub const DEFAULT_DATABASE_PATH: &str = "telemedicine.db";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_VIDEO_TOKEN_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
    pub bind_address: String,
    pub twilio_account_sid: String,
    pub twilio_api_key_sid: String,
    pub twilio_api_key_secret: String,
    pub video_token_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            twilio_account_sid: String::new(),
            twilio_api_key_sid: String::new(),
            twilio_api_key_secret: String::new(),
            video_token_ttl_secs: DEFAULT_VIDEO_TOKEN_TTL_SECS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            database_path: lookup("DATABASE_PATH")
                .unwrap_or_else(|| {
                    warn!("DATABASE_PATH not set, using {}", DEFAULT_DATABASE_PATH);
                    DEFAULT_DATABASE_PATH.to_string()
                }),
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| {
                    warn!("BIND_ADDRESS not set, using {}", DEFAULT_BIND_ADDRESS);
                    DEFAULT_BIND_ADDRESS.to_string()
                }),
            twilio_account_sid: lookup("TWILIO_ACCOUNT_SID")
                .unwrap_or_else(|| {
                    warn!("TWILIO_ACCOUNT_SID not set, using empty value");
                    String::new()
                }),
            twilio_api_key_sid: lookup("TWILIO_API_KEY_SID")
                .unwrap_or_else(|| {
                    warn!("TWILIO_API_KEY_SID not set, using empty value");
                    String::new()
                }),
            twilio_api_key_secret: lookup("TWILIO_API_KEY_SECRET")
                .unwrap_or_else(|| {
                    warn!("TWILIO_API_KEY_SECRET not set, using empty value");
                    String::new()
                }),
            video_token_ttl_secs: match lookup("TWILIO_TOKEN_TTL_SECS") {
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    warn!("TWILIO_TOKEN_TTL_SECS is not a number ({}), using default", raw);
                    DEFAULT_VIDEO_TOKEN_TTL_SECS
                }),
                None => DEFAULT_VIDEO_TOKEN_TTL_SECS,
            },
        };

        if !config.is_video_configured() {
            warn!("Video tokens disabled - Twilio credentials missing");
        }

        config
    }

    pub fn is_video_configured(&self) -> bool {
        !self.twilio_account_sid.is_empty()
            && !self.twilio_api_key_sid.is_empty()
            && !self.twilio_api_key_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.database_path, DEFAULT_DATABASE_PATH);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.video_token_ttl_secs, DEFAULT_VIDEO_TOKEN_TTL_SECS);
        assert!(!config.is_video_configured());
    }

    #[test]
    fn video_is_configured_only_with_all_credentials() {
        let partial = AppConfig::from_lookup(lookup_from(&[
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_API_KEY_SID", "SK123"),
        ]));
        assert!(!partial.is_video_configured());

        let full = AppConfig::from_lookup(lookup_from(&[
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_API_KEY_SID", "SK123"),
            ("TWILIO_API_KEY_SECRET", "secret"),
            ("TWILIO_TOKEN_TTL_SECS", "600"),
        ]));
        assert!(full.is_video_configured());
        assert_eq!(full.video_token_ttl_secs, 600);
    }

    #[test]
    fn bad_ttl_falls_back_to_default() {
        let config = AppConfig::from_lookup(lookup_from(&[("TWILIO_TOKEN_TTL_SECS", "soon")]));
        assert_eq!(config.video_token_ttl_secs, DEFAULT_VIDEO_TOKEN_TTL_SECS);
    }
}
