/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its
 * implementation, which sends whole dialogue files to a chat-style LLM API
 * and returns the translated full-file text together with token usage.
 */

use anyhow::{Result, anyhow};
use std::time::{Duration, Instant};

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::mock::{MockBehavior, MockClient, MockRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// Token usage statistics for tracking API consumption
#[derive(Clone)]
pub struct TokenUsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u64,

    /// Number of completion tokens
    pub completion_tokens: u64,

    /// Total number of tokens
    pub total_tokens: u64,

    /// Start time of token tracking
    pub start_time: Instant,

    /// Total time spent on API requests
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,
}

impl Default for TokenUsageStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenUsageStats {
    /// Create a new empty token usage stats instance
    pub fn new() -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
            start_time: Instant::now(),
            api_duration: Duration::from_secs(0),
            provider: String::new(),
            model: String::new(),
        }
    }

    /// Create new token usage stats with provider info
    pub fn with_provider_info(provider: String, model: String) -> Self {
        Self {
            provider,
            model,
            ..Self::new()
        }
    }

    /// Record the usage reported for one API call
    pub fn record(&mut self, usage: &ApiUsage) {
        if let Some(pt) = usage.prompt_tokens {
            self.prompt_tokens += pt;
            self.total_tokens += pt;
        }
        if let Some(ct) = usage.completion_tokens {
            self.completion_tokens += ct;
            self.total_tokens += ct;
        }
        self.api_duration += usage.duration;
    }

    /// Calculate tokens per minute rate
    pub fn tokens_per_minute(&self) -> f64 {
        let duration_minutes = if self.api_duration.as_secs_f64() > 0.0 {
            self.api_duration.as_secs_f64() / 60.0
        } else {
            self.start_time.elapsed().as_secs_f64() / 60.0
        };

        if duration_minutes > 0.0 {
            self.total_tokens as f64 / duration_minutes
        } else {
            0.0
        }
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "Token usage: {} ({}) - prompt {}, completion {}, total {} - {:.0} tokens/min",
            self.provider,
            self.model,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens,
            self.tokens_per_minute()
        )
    }
}

/// Token usage and timing reported for a single API call
#[derive(Debug, Clone, Default)]
pub struct ApiUsage {
    /// Prompt tokens, when the API reports them
    pub prompt_tokens: Option<u64>,

    /// Completion tokens, when the API reports them
    pub completion_tokens: Option<u64>,

    /// Wall-clock duration of the call
    pub duration: Duration,
}

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// OpenAI API service
    OpenAI {
        /// Client instance
        client: OpenAI,
    },

    /// Anthropic API service
    Anthropic {
        /// Client instance
        client: Anthropic,
    },

    /// In-process mock (tests and offline runs)
    Mock {
        /// Client instance
        client: MockClient,
    },
}

/// Main translation service for dialogue file translation
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let provider = match config.provider {
            ConfigTranslationProvider::OpenAI => TranslationProviderImpl::OpenAI {
                client: OpenAI::new(config.api_key.clone(), config.endpoint.clone()),
            },
            ConfigTranslationProvider::Anthropic => TranslationProviderImpl::Anthropic {
                client: Anthropic::new(config.api_key.clone(), config.endpoint.clone()),
            },
            ConfigTranslationProvider::Mock => TranslationProviderImpl::Mock {
                client: MockClient::new(MockBehavior::Echo),
            },
        };

        Ok(Self { provider, config })
    }

    /// Create a service that answers through the given mock client.
    ///
    /// Test seam: lets the full pipeline run against scripted responses.
    pub fn with_mock(config: TranslationConfig, client: MockClient) -> Self {
        Self {
            provider: TranslationProviderImpl::Mock { client },
            config,
        }
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<()> {
        match &self.provider {
            TranslationProviderImpl::OpenAI { client } => client
                .test_connection()
                .await
                .map_err(|e| anyhow!("Failed to connect to OpenAI API: {}", e)),
            TranslationProviderImpl::Anthropic { client } => client
                .test_connection()
                .await
                .map_err(|e| anyhow!("Failed to connect to Anthropic API: {}", e)),
            TranslationProviderImpl::Mock { client } => client
                .test_connection()
                .await
                .map_err(|e| anyhow!("Mock provider refused connection: {}", e)),
        }
    }

    /// Translate the full content of one dialogue file.
    ///
    /// The configured system instruction is sent together with the raw file
    /// content as the user turn; the provider returns the translated
    /// full-file text. Returns the text and the usage reported by the API.
    pub async fn translate_file(&self, content: &str) -> Result<(String, ApiUsage)> {
        if content.trim().is_empty() {
            return Ok((String::new(), ApiUsage::default()));
        }

        let system_prompt = &self.config.common.system_prompt;
        let model = self.config.get_model();
        let temperature = self.config.common.temperature;
        let start_time = Instant::now();

        match &self.provider {
            TranslationProviderImpl::OpenAI { client } => {
                let request = OpenAIRequest::new(&model)
                    .add_message("system", system_prompt)
                    .add_message("user", content)
                    .temperature(temperature);

                let response = client
                    .complete(request)
                    .await
                    .map_err(|e| anyhow!("OpenAI translation error: {}", e))?;

                let translated = OpenAI::extract_text(&response);
                if translated.is_empty() {
                    return Err(anyhow!("OpenAI returned an empty response"));
                }

                let usage = ApiUsage {
                    prompt_tokens: response.usage.as_ref().map(|u| u.prompt_tokens as u64),
                    completion_tokens: response.usage.as_ref().map(|u| u.completion_tokens as u64),
                    duration: start_time.elapsed(),
                };
                Ok((translated, usage))
            }
            TranslationProviderImpl::Anthropic { client } => {
                let request = AnthropicRequest::new(&model, max_tokens_for_model(&model))
                    .system(system_prompt)
                    .add_message("user", content)
                    .temperature(temperature);

                let response = client
                    .complete(request)
                    .await
                    .map_err(|e| anyhow!("Anthropic translation error: {}", e))?;

                let translated = Anthropic::extract_text(&response);
                if translated.is_empty() {
                    return Err(anyhow!("Anthropic returned an empty response"));
                }

                let usage = ApiUsage {
                    prompt_tokens: Some(response.usage.input_tokens as u64),
                    completion_tokens: Some(response.usage.output_tokens as u64),
                    duration: start_time.elapsed(),
                };
                Ok((translated, usage))
            }
            TranslationProviderImpl::Mock { client } => {
                let request = MockRequest {
                    system: system_prompt.clone(),
                    user: content.to_string(),
                };

                let response = client
                    .complete(request)
                    .await
                    .map_err(|e| anyhow!("Mock translation error: {}", e))?;

                let usage = ApiUsage {
                    prompt_tokens: Some(response.prompt_tokens as u64),
                    completion_tokens: Some(response.completion_tokens as u64),
                    duration: start_time.elapsed(),
                };
                Ok((response.text, usage))
            }
        }
    }
}

/// Maximum completion tokens for a given model (used where the API requires
/// an explicit cap)
fn max_tokens_for_model(model: &str) -> u32 {
    match model {
        "claude-3-5-sonnet-20240620" | "claude-3-5-haiku-20241022" => 8192,
        "claude-3-opus-20240229" | "claude-3-sonnet-20240229" | "claude-3-haiku-20240307" => 4096,
        _ => 4096,
    }
}
