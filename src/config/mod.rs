use anyhow::{Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::ModelKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub provider: ModelKind,
    pub gemini_endpoint: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub record_history: bool,
    pub save_request: bool,
    pub save_response: bool,
    /// Overrides the platform data directory when set.
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ModelKind::Gemini,
            gemini_endpoint:
                "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
                    .into(),
            temperature: 0.7,
            max_output_tokens: 8192,
            record_history: true,
            save_request: false,
            save_response: false,
            data_dir: None,
        }
    }
}

impl Config {
    /// Defaults, optionally overridden by a TOML file. Unknown keys are
    /// rejected so a typo in the file surfaces instead of silently falling
    /// back to a default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(p) => {
                let raw = fs::read_to_string(p)
                    .with_context(|| format!("failed to read config file {}", p.display()))?;
                let cfg: Config = toml::from_str(&raw)
                    .with_context(|| format!("failed to parse config file {}", p.display()))?;
                Ok(cfg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_gemini() {
        let cfg = Config::default();
        assert!(matches!(cfg.provider, ModelKind::Gemini));
        assert!(cfg.gemini_endpoint.contains("generativelanguage.googleapis.com"));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let cfg: Config = toml::from_str("temperature = 0.2\n").unwrap();
        assert_eq!(cfg.temperature, 0.2);
        assert_eq!(cfg.max_output_tokens, Config::default().max_output_tokens);
        assert!(cfg.record_history);
    }
}
