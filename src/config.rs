use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveTime;
use directories::ProjectDirs;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_MEETING_START: &str = "09:00";
/// Gemini caps inline request payloads at 20 MB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 20 * 1024 * 1024;

/// Checked in order; the first non-empty value wins.
const API_KEY_ENV_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];
const BASE_URL_ENV_VAR: &str = "GEMINI_BASE_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub agenda: AgendaConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key. Prefer the GEMINI_API_KEY environment variable.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Model used for the one-shot agenda generation call.
    pub analysis_model: String,
    /// Model used for follow-up chat.
    pub chat_model: String,
    /// Sampling temperature for agenda generation.
    pub temperature: f64,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            temperature: 0.3,
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AgendaConfig {
    /// Timeline anchor, `HH:MM` local time.
    pub meeting_start: String,
    pub max_file_bytes: u64,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            meeting_start: DEFAULT_MEETING_START.to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl AgendaConfig {
    pub fn meeting_start_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(self.meeting_start.trim(), "%H:%M")
            .with_context(|| format!("Invalid meeting_start {:?}, expected HH:MM", self.meeting_start))
    }
}

impl Config {
    /// Load from an explicit path, or the platform config file when present.
    ///
    /// A missing default file yields defaults; a missing explicit file is an
    /// error. Environment overrides are applied last.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match explicit {
            Some(raw) => {
                let path = PathBuf::from(shellexpand::tilde(raw).to_string());
                Self::from_file(&path)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.agenda.meeting_start_time()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = API_KEY_ENV_VARS.into_iter().find_map(|var| non_empty(var)) {
            self.gemini.api_key = Some(key);
        }
        if let Some(url) = non_empty(BASE_URL_ENV_VAR) {
            self.gemini.base_url = url;
        }
    }

    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).context("Failed to serialize config schema")
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "agendai").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[gemini]\nchat_model = \"gemini-2.5-pro\"\n\n[agenda]\nmeeting_start = \"13:30\"").unwrap();

        let config = Config::from_file(tmp.path()).unwrap();
        assert_eq!(config.gemini.chat_model, "gemini-2.5-pro");
        assert_eq!(config.gemini.analysis_model, DEFAULT_ANALYSIS_MODEL);
        assert_eq!(config.gemini.temperature, 0.3);
        assert_eq!(
            config.agenda.meeting_start_time().unwrap(),
            NaiveTime::from_hms_opt(13, 30, 0).unwrap()
        );
        assert_eq!(config.agenda.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
    }

    #[test]
    fn env_overrides_prefer_gemini_key() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GEMINI_API_KEY", ""),
            ("GOOGLE_API_KEY", "google-key"),
            ("API_KEY", "generic-key"),
            ("GEMINI_BASE_URL", "http://127.0.0.1:8080"),
        ]);
        let mut config = Config::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.gemini.api_key.as_deref(), Some("google-key"));
        assert_eq!(config.gemini.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn bad_meeting_start_is_rejected() {
        let agenda = AgendaConfig {
            meeting_start: "9am".into(),
            ..Default::default()
        };
        assert!(agenda.meeting_start_time().is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Config::load(path.to_str()).is_err());
    }

    #[test]
    fn schema_names_sections() {
        let schema = Config::json_schema().unwrap();
        assert!(schema.contains("analysis_model"));
        assert!(schema.contains("meeting_start"));
    }
}
