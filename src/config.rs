//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.skillsync.toml` files.

use crate::analysis::AnalysisOrchestrator;
use crate::cli::Args;
use crate::llm::{GenerationConfig, MentorChat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".skillsync.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Model settings for assessment analysis.
    #[serde(default)]
    pub model: ModelConfig,

    /// Mentor chat sampling.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Wellness reminder settings.
    #[serde(default)]
    pub reminders: ReminderConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default report path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// JSON file holding chat history and reminder timers.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
            state_file: default_state_file(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("skillsync_report.md")
}

fn default_state_file() -> PathBuf {
    PathBuf::from(".skillsync/state.json")
}

/// Generative model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name.
    #[serde(default = "default_model")]
    pub name: String,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key. Usually supplied through `GEMINI_API_KEY`; never written
    /// back out.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            base_url: default_base_url(),
            api_key: None,
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ModelConfig {
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
            max_output_tokens: self.max_output_tokens,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The API key, if one is set and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    AnalysisOrchestrator::default_generation().temperature
}

fn default_top_k() -> u32 {
    AnalysisOrchestrator::default_generation().top_k
}

fn default_top_p() -> f32 {
    AnalysisOrchestrator::default_generation().top_p
}

fn default_max_output_tokens() -> u32 {
    AnalysisOrchestrator::default_generation().max_output_tokens
}

fn default_timeout() -> u64 {
    30
}

/// Sampling for the mentor persona; missing fields keep the persona defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        let g = MentorChat::default_generation();
        Self {
            temperature: g.temperature,
            top_k: g.top_k,
            top_p: g.top_p,
            max_output_tokens: g.max_output_tokens,
        }
    }
}

impl ChatConfig {
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

/// Wellness reminder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Surface reminders during chat.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between checks in `remind --watch`.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_seconds: default_tick_seconds(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_seconds() -> u64 {
    60
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments and environment.
    ///
    /// Only values the user actually supplied override the file.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref model) = args.model {
            self.model.name = model.clone();
        }
        if let Some(ref key) = args.api_key {
            self.model.api_key = Some(key.clone());
        }
        if let Some(timeout) = args.timeout {
            self.model.timeout_seconds = timeout;
        }
        if let Some(ref state_file) = args.state_file {
            self.general.state_file = state_file.clone();
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Log level after merging: `--quiet` wins over a `verbose` set from
    /// either the file or the command line.
    pub fn log_level(&self, quiet: bool) -> tracing::Level {
        if quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;

    fn make_args() -> Args {
        Args {
            command: Command::InitConfig,
            config: None,
            verbose: false,
            quiet: false,
            model: None,
            api_key: None,
            timeout: None,
            state_file: None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.name, "gemini-pro");
        assert_eq!(config.model.timeout_seconds, 30);
        assert_eq!(config.model.credential(), None);
        assert_eq!(config.chat.generation(), MentorChat::default_generation());
        assert_eq!(config.reminders.tick_seconds, 60);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "custom_report.md"
verbose = true

[model]
name = "gemini-1.5-flash"
temperature = 0.4
api_key = "from-file"

[chat]
max_output_tokens = 120
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, PathBuf::from("custom_report.md"));
        assert!(config.general.verbose);
        assert_eq!(config.model.name, "gemini-1.5-flash");
        assert_eq!(config.model.temperature, 0.4);
        assert_eq!(config.model.top_k, 40);
        assert_eq!(config.model.credential(), Some("from-file"));
        assert_eq!(config.chat.max_output_tokens, 120);
        assert_eq!(config.chat.temperature, 0.8);
        assert!(config.reminders.enabled);
    }

    #[test]
    fn test_blank_api_key_is_no_credential() {
        let mut config = Config::default();
        config.model.api_key = Some("   ".to_string());
        assert_eq!(config.model.credential(), None);
    }

    #[test]
    fn test_merge_with_args_only_overrides_given_values() {
        let mut config = Config::default();
        config.model.name = "from-file".to_string();

        let mut args = make_args();
        config.merge_with_args(&args);
        assert_eq!(config.model.name, "from-file");
        assert_eq!(config.model.api_key, None);

        args.model = Some("gemini-1.5-pro".to_string());
        args.api_key = Some("secret".to_string());
        args.timeout = Some(5);
        config.merge_with_args(&args);
        assert_eq!(config.model.name, "gemini-1.5-pro");
        assert_eq!(config.model.credential(), Some("secret"));
        assert_eq!(config.model.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_log_level_follows_merged_verbose() {
        let mut config = Config::default();
        assert_eq!(config.log_level(false), tracing::Level::INFO);

        // verbose from the file alone
        config.general.verbose = true;
        assert_eq!(config.log_level(false), tracing::Level::DEBUG);
        assert_eq!(config.log_level(true), tracing::Level::ERROR);

        // verbose from the command line
        let mut config = Config::default();
        let mut args = make_args();
        args.verbose = true;
        config.merge_with_args(&args);
        assert_eq!(config.log_level(args.quiet), tracing::Level::DEBUG);
    }

    #[test]
    fn test_default_toml_never_contains_api_key() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[model]"));
        assert!(toml_str.contains("[chat]"));
        assert!(toml_str.contains("[reminders]"));
        assert!(!toml_str.contains("api_key"));
    }
}
