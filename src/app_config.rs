use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Character encoding of the source files (an encoding label such as
    /// "windows-1251" or "utf-8"); output is always written as UTF-8
    #[serde(default = "default_source_encoding")]
    pub source_encoding: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_encoding: default_source_encoding(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: Anthropic
    Anthropic,
    // @provider: In-process mock (tests and offline dry runs)
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }

    /// Whether this provider needs an API key to operate
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Mock)
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Model name; empty selects the provider's default model
    #[serde(default = "String::new")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL; empty selects the provider's public endpoint
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Number of files translated concurrently
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Token ceiling per planned batch (model context budget)
    #[serde(default = "default_max_tokens_per_batch")]
    pub max_tokens_per_batch: usize,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            model: String::new(),
            api_key: String::new(),
            endpoint: String::new(),
            concurrent_files: default_concurrent_files(),
            max_tokens_per_batch: default_max_tokens_per_batch(),
            common: TranslationCommonConfig::default(),
        }
    }
}

impl TranslationConfig {
    /// Effective model name, falling back to the provider default
    pub fn get_model(&self) -> String {
        if !self.model.is_empty() {
            return self.model.clone();
        }
        match self.provider {
            TranslationProvider::OpenAI => default_openai_model(),
            TranslationProvider::Anthropic => default_anthropic_model(),
            TranslationProvider::Mock => "mock".to_string(),
        }
    }
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt sent with every file
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Temperature parameter for text generation (0.0 to 2.0)
    /// Lower values make output more deterministic, higher values more creative
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_encoding() -> String {
    // Fallout-era .msg files ship in a Cyrillic single-byte encoding
    "windows-1251".to_string()
}

fn default_concurrent_files() -> usize {
    4
}

fn default_max_tokens_per_batch() -> usize {
    // Context window of the 16k models the tool was built around
    16384
}

fn default_temperature() -> f32 {
    0.0
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_system_prompt() -> String {
    "You are a translation agent translating Fallout Sonora .msg game files from Russian to English. \
     Fallout Sonora is a Fallout 2 mod written in Russian. You will be provided a file in a specific \
     format that contains Russian, and your task is to translate the Russian into English and replace \
     the Russian with English, in place, maintaining the format of the .msg file.".to_string()
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate the source encoding label
        if encoding_rs::Encoding::for_label(self.source_encoding.as_bytes()).is_none() {
            return Err(anyhow!("Unknown source encoding: {}", self.source_encoding));
        }

        // Validate API key for remote providers
        if self.translation.provider.requires_api_key() && self.translation.api_key.is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider",
                self.translation.provider.display_name()
            ));
        }

        if !(0.0..=2.0).contains(&self.translation.common.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.translation.common.temperature
            ));
        }

        if self.translation.concurrent_files == 0 {
            return Err(anyhow!("concurrent_files must be at least 1"));
        }

        if self.translation.max_tokens_per_batch == 0 {
            return Err(anyhow!("max_tokens_per_batch must be greater than zero"));
        }

        Ok(())
    }
}
