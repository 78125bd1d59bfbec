//! Process configuration read once from the environment at startup.

use std::net::SocketAddr;

use crate::prompt::{Mode, PromptProfile};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not defined in the environment variables")]
    MissingApiKey,

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub profile: PromptProfile,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let base_url = get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: "MAX_UPLOAD_BYTES",
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let mode = match get("GROCERY_MODE") {
            Some(raw) => raw.parse::<Mode>().map_err(|reason| ConfigError::Invalid {
                var: "GROCERY_MODE",
                reason,
            })?,
            None => Mode::Organize,
        };

        let mut profile = PromptProfile::for_mode(mode);
        if let Some(model) = get("GROCERY_MODEL") {
            profile = profile.with_model(model);
        }

        Ok(Self {
            api_key,
            base_url,
            bind_addr,
            max_upload_bytes,
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ResultView;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn missing_key_fails() {
        assert!(matches!(settings(&[]), Err(ConfigError::MissingApiKey)));
        assert!(matches!(
            settings(&[("OPENAI_API_KEY", "  ")]),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn defaults() {
        let s = settings(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
        assert_eq!(s.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(s.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(s.profile, PromptProfile::organize());
    }

    #[test]
    fn overrides() {
        let s = settings(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1"),
            ("BIND_ADDR", "127.0.0.1:8000"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("GROCERY_MODE", "describe"),
            ("GROCERY_MODEL", "gpt-4o"),
        ])
        .unwrap();
        assert_eq!(s.base_url, "http://localhost:8080/v1");
        assert_eq!(s.bind_addr.port(), 8000);
        assert_eq!(s.max_upload_bytes, 1024);
        assert_eq!(s.profile.view, ResultView::Text);
        assert_eq!(s.profile.model, "gpt-4o");
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = settings(&[("OPENAI_API_KEY", "k"), ("GROCERY_MODE", "shuffle")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "GROCERY_MODE", .. }));

        let err = settings(&[("OPENAI_API_KEY", "k"), ("MAX_UPLOAD_BYTES", "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "MAX_UPLOAD_BYTES", .. }));

        let err = settings(&[("OPENAI_API_KEY", "k"), ("BIND_ADDR", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "BIND_ADDR", .. }));
    }
}
