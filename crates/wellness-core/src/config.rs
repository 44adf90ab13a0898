//! Tracker configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/wellness/config/wellness.toml) if it exists
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Secrets never live in the file. They come from the environment (see
//! [`Secrets`]), and a few environment variables override file values
//! (see [`TrackerConfig::apply_overrides`]).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/wellness.toml");

pub const DEFAULT_OPENAI_HOST: &str = "https://api.openai.com";
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Environment variables read by the tracker
pub mod env {
    pub const NOTION_API_KEY: &str = "NOTION_API_KEY";
    pub const NOTION_DATABASE_ID: &str = "NOTION_DATABASE_ID";
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const ANALYSIS_MODEL: &str = "ANALYSIS_MODEL";
    pub const OLLAMA_HOST: &str = "OLLAMA_HOST";
    pub const AI_BACKEND: &str = "AI_BACKEND";
}

/// Which narrative backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeBackendKind {
    /// OpenAI or any server speaking the chat completions API
    #[serde(rename = "openai")]
    OpenAI,
    Ollama,
    Mock,
}

impl NarrativeBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativeBackendKind::OpenAI => "openai",
            NarrativeBackendKind::Ollama => "ollama",
            NarrativeBackendKind::Mock => "mock",
        }
    }
}

impl fmt::Display for NarrativeBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NarrativeBackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "openai_compatible" => Ok(NarrativeBackendKind::OpenAI),
            "ollama" => Ok(NarrativeBackendKind::Ollama),
            "mock" => Ok(NarrativeBackendKind::Mock),
            _ => Err(format!("Unknown narrative backend: {}", s)),
        }
    }
}

/// Which journal store to read entries from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackendKind {
    Notion,
    File,
}

impl StoreBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackendKind::Notion => "notion",
            StoreBackendKind::File => "file",
        }
    }
}

impl fmt::Display for StoreBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StoreBackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notion" => Ok(StoreBackendKind::Notion),
            "file" => Ok(StoreBackendKind::File),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Look-back window in days
    pub days_back: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeConfig {
    pub backend: NarrativeBackendKind,
    pub model: String,
    pub host: String,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(rename = "timeout_secs", serialize_with = "serialize_secs")]
    pub timeout: Duration,
}

// Whole seconds, matching the `timeout_secs` key in the TOML file
fn serialize_secs<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_secs())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreConfig {
    pub backend: StoreBackendKind,
    /// `Notion-Version` header value
    pub notion_version: String,
    pub page_size: u32,
    pub file: PathBuf,
}

/// Where the active config came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Embedded => write!(f, "embedded defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolved tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerConfig {
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
    pub narrative: NarrativeConfig,
    pub store: StoreConfig,
    pub source: ConfigSource,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig { days_back: 30 },
            report: ReportConfig {
                path: PathBuf::from("wellness_report.txt"),
            },
            narrative: NarrativeConfig {
                backend: NarrativeBackendKind::OpenAI,
                model: "gpt-4o-mini".to_string(),
                host: DEFAULT_OPENAI_HOST.to_string(),
                max_tokens: 500,
                temperature: 0.7,
                timeout: Duration::from_secs(60),
            },
            store: StoreConfig {
                backend: StoreBackendKind::Notion,
                notion_version: "2022-06-28".to_string(),
                page_size: 100,
                file: PathBuf::from("journal.json"),
            },
            source: ConfigSource::Embedded,
        }
    }
}

impl TrackerConfig {
    /// Load config from an explicit path, the data-dir override, or the
    /// embedded defaults, in that order
    ///
    /// An explicit path that does not exist is an error; a missing data-dir
    /// override is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Self::parse(DEFAULT_CONFIG),
        }
    }

    /// Load and parse a specific config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let mut config = Self::parse(&content)?;
        config.source = ConfigSource::File(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded config override");
        Ok(config)
    }

    /// Parse config from TOML content over the built-in defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = TrackerConfig::default();

        if let Some(analysis) = raw.analysis {
            if let Some(days) = analysis.days_back {
                config.analysis.days_back = days;
            }
        }

        if let Some(report) = raw.report {
            if let Some(path) = report.path {
                config.report.path = path;
            }
        }

        if let Some(narrative) = raw.narrative {
            if let Some(backend) = narrative.backend {
                config.narrative.backend = backend.parse().map_err(Error::Config)?;
            }
            if let Some(model) = narrative.model {
                config.narrative.model = model;
            }
            if let Some(host) = narrative.host {
                config.narrative.host = host;
            }
            if let Some(max_tokens) = narrative.max_tokens {
                config.narrative.max_tokens = max_tokens;
            }
            if let Some(temperature) = narrative.temperature {
                config.narrative.temperature = temperature;
            }
            if let Some(timeout) = narrative.timeout_secs {
                config.narrative.timeout = Duration::from_secs(timeout);
            }
        }

        if let Some(store) = raw.store {
            if let Some(backend) = store.backend {
                config.store.backend = backend.parse().map_err(Error::Config)?;
            }
            if let Some(version) = store.notion_version {
                config.store.notion_version = version;
            }
            if let Some(page_size) = store.page_size {
                config.store.page_size = page_size;
            }
            if let Some(file) = store.file {
                config.store.file = file;
            }
        }

        config.fix_ollama_host();
        Ok(config)
    }

    /// Apply environment overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    ///
    /// - `AI_BACKEND` replaces `narrative.backend`
    /// - `ANALYSIS_MODEL` replaces `narrative.model`
    /// - `OLLAMA_HOST` replaces `narrative.host` when the backend is ollama
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(backend) = non_empty(env::AI_BACKEND) {
            self.narrative.backend = backend.parse().map_err(Error::Config)?;
        }
        if let Some(model) = non_empty(env::ANALYSIS_MODEL) {
            self.narrative.model = model;
        }
        if self.narrative.backend == NarrativeBackendKind::Ollama {
            if let Some(host) = non_empty(env::OLLAMA_HOST) {
                self.narrative.host = host;
            }
        }

        self.fix_ollama_host();
        Ok(())
    }

    /// Lookback start date for a run ending on `today`
    ///
    /// A window reaching past the representable date range is a config error.
    pub fn since(
        &self,
        today: chrono::NaiveDate,
        days_override: Option<u32>,
    ) -> Result<chrono::NaiveDate> {
        let days = days_override.unwrap_or(self.analysis.days_back);
        today
            .checked_sub_signed(chrono::Duration::days(i64::from(days)))
            .ok_or_else(|| Error::Config(format!("look-back window of {} days is too large", days)))
    }

    // The OpenAI host is meaningless for a local Ollama server
    fn fix_ollama_host(&mut self) {
        if self.narrative.backend == NarrativeBackendKind::Ollama
            && self.narrative.host == DEFAULT_OPENAI_HOST
        {
            self.narrative.host = DEFAULT_OLLAMA_HOST.to_string();
        }
    }
}

/// Credentials and identifiers read from the environment
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    pub notion_api_key: Option<String>,
    pub notion_database_id: Option<String>,
    pub openai_api_key: Option<String>,
}

// Keep keys out of debug logs
impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Secrets")
            .field("notion_api_key", &mask(&self.notion_api_key))
            .field("notion_database_id", &mask(&self.notion_database_id))
            .field("openai_api_key", &mask(&self.openai_api_key))
            .finish()
    }
}

impl Secrets {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            notion_api_key: get(env::NOTION_API_KEY),
            notion_database_id: get(env::NOTION_DATABASE_ID),
            openai_api_key: get(env::OPENAI_API_KEY),
        }
    }

    /// Variables the configured backends need that are not set
    pub fn missing(&self, config: &TrackerConfig) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if config.store.backend == StoreBackendKind::Notion {
            if self.notion_api_key.is_none() {
                missing.push(env::NOTION_API_KEY);
            }
            if self.notion_database_id.is_none() {
                missing.push(env::NOTION_DATABASE_ID);
            }
        }
        if config.narrative.backend == NarrativeBackendKind::OpenAI
            && config.narrative.host == DEFAULT_OPENAI_HOST
            && self.openai_api_key.is_none()
        {
            missing.push(env::OPENAI_API_KEY);
        }
        missing
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("wellness").join("config").join("wellness.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    analysis: Option<RawAnalysis>,
    report: Option<RawReport>,
    narrative: Option<RawNarrative>,
    store: Option<RawStore>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    days_back: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawReport {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawNarrative {
    backend: Option<String>,
    model: Option<String>,
    host: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawStore {
    backend: Option<String>,
    notion_version: Option<String>,
    page_size: Option<u32>,
    file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_default_config() {
        let config = TrackerConfig::parse(DEFAULT_CONFIG).unwrap();
        let defaults = TrackerConfig::default();
        assert_eq!(config, defaults);
        assert_eq!(config.analysis.days_back, 30);
        assert_eq!(config.narrative.model, "gpt-4o-mini");
        assert_eq!(config.narrative.timeout, Duration::from_secs(60));
        assert_eq!(config.store.backend, StoreBackendKind::Notion);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = TrackerConfig::parse(
            r#"
            [analysis]
            days_back = 7

            [store]
            backend = "file"
            file = "/tmp/j.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis.days_back, 7);
        assert_eq!(config.store.backend, StoreBackendKind::File);
        assert_eq!(config.store.file, PathBuf::from("/tmp/j.json"));
        assert_eq!(config.store.page_size, 100);
        assert_eq!(config.narrative.max_tokens, 500);
    }

    #[test]
    fn test_empty_config_is_defaults() {
        assert_eq!(TrackerConfig::parse("").unwrap(), TrackerConfig::default());
    }

    #[test]
    fn test_invalid_backend_is_config_error() {
        let err = TrackerConfig::parse("[narrative]\nbackend = \"gpt-cloud\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = TrackerConfig::parse("[analysis]\ndays_back = \"thirty\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_ollama_gets_local_default_host() {
        let config = TrackerConfig::parse("[narrative]\nbackend = \"ollama\"").unwrap();
        assert_eq!(config.narrative.host, DEFAULT_OLLAMA_HOST);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = TrackerConfig::default();
        config
            .apply_overrides(lookup(&[
                ("AI_BACKEND", "ollama"),
                ("ANALYSIS_MODEL", "llama3.2"),
                ("OLLAMA_HOST", "http://10.0.0.5:11434"),
            ]))
            .unwrap();

        assert_eq!(config.narrative.backend, NarrativeBackendKind::Ollama);
        assert_eq!(config.narrative.model, "llama3.2");
        assert_eq!(config.narrative.host, "http://10.0.0.5:11434");
    }

    #[test]
    fn test_ollama_host_ignored_for_openai() {
        let mut config = TrackerConfig::default();
        config
            .apply_overrides(lookup(&[("OLLAMA_HOST", "http://10.0.0.5:11434")]))
            .unwrap();
        assert_eq!(config.narrative.host, DEFAULT_OPENAI_HOST);
    }

    #[test]
    fn test_blank_env_values_ignored() {
        let mut config = TrackerConfig::default();
        config
            .apply_overrides(lookup(&[("ANALYSIS_MODEL", "  "), ("AI_BACKEND", "")]))
            .unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_bad_backend_override() {
        let mut config = TrackerConfig::default();
        let err = config
            .apply_overrides(lookup(&[("AI_BACKEND", "skynet")]))
            .unwrap_err();
        assert!(err.to_string().contains("skynet"));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\npath = \"out/report.txt\"").unwrap();

        let config = TrackerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.report.path, PathBuf::from("out/report.txt"));
        assert_eq!(config.source, ConfigSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = TrackerConfig::load(Some(Path::new("/nonexistent/wellness.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_since() {
        let config = TrackerConfig::default();
        let today = chrono::NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(
            config.since(today, None).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(
            config.since(today, Some(7)).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 24).unwrap()
        );
    }

    #[test]
    fn test_serialized_config_uses_file_names() {
        let json = serde_json::to_value(TrackerConfig::default()).unwrap();
        assert_eq!(json["narrative"]["backend"], "openai");
        assert_eq!(json["narrative"]["timeout_secs"], 60);
        assert_eq!(json["store"]["backend"], "notion");

        let backend = json["narrative"]["backend"].as_str().unwrap();
        assert_eq!(
            backend.parse::<NarrativeBackendKind>().unwrap(),
            NarrativeBackendKind::OpenAI
        );
    }

    #[test]
    fn test_since_huge_window_is_error() {
        let config = TrackerConfig::default();
        let today = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let err = config.since(today, Some(u32::MAX)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_secrets_missing() {
        let config = TrackerConfig::default();
        let secrets = Secrets::from_lookup(lookup(&[("NOTION_API_KEY", "secret_abc")]));
        assert_eq!(
            secrets.missing(&config),
            vec!["NOTION_DATABASE_ID", "OPENAI_API_KEY"]
        );

        let mut offline = TrackerConfig::default();
        offline.store.backend = StoreBackendKind::File;
        offline.narrative.backend = NarrativeBackendKind::Mock;
        assert!(Secrets::default().missing(&offline).is_empty());
    }

    #[test]
    fn test_secrets_debug_masks_values() {
        let secrets = Secrets::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-live-123")]));
        let debug = format!("{:?}", secrets);
        assert!(!debug.contains("sk-live-123"));
        assert!(debug.contains("<set>"));
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("wellness/config/wellness.toml"));
        }
    }
}
