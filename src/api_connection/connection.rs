use async_trait::async_trait;
use dotenv::dotenv;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::env;
use std::error::Error;
use std::fmt;

use super::endpoints::{
    AnthropicErrorResponse, AnthropicRequest, AnthropicResponse, AvailableModel, ChatMessage,
    GeminiContent, GeminiErrorResponse, GeminiGenerationConfig, GeminiPart, GeminiRequest,
    GeminiResponse, GenerationSettings, Provider, ProviderErrorBody, ANTHROPIC_API_BASE, ANTHROPIC_MODELS,
    ANTHROPIC_VERSION, GEMINI_API_BASE, GEMINI_MODELS,
};
use super::CompletionBackend;

pub const GEMINI_API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
pub const ANTHROPIC_API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

#[derive(Debug)]
pub enum ApiConnectionError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    SerializationError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    EmptyResponse(String),
    /// Scripted failure from a non-network backend.
    Backend(String),
}

impl fmt::Display for ApiConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiConnectionError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            ApiConnectionError::NetworkError(err) => write!(f, "Network error: {}", err),
            ApiConnectionError::SerializationError(err) => {
                write!(f, "Serialization error: {}", err)
            }
            ApiConnectionError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
            ApiConnectionError::EmptyResponse(provider) => {
                write!(f, "{} returned no text content", provider)
            }
            ApiConnectionError::Backend(message) => write!(f, "Backend error: {}", message),
        }
    }
}

impl Error for ApiConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiConnectionError::NetworkError(err) => Some(err),
            ApiConnectionError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        ApiConnectionError::NetworkError(err)
    }
}

impl From<serde_json::Error> for ApiConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ApiConnectionError::SerializationError(err)
    }
}

impl Provider {
    pub fn gemini(api_key_env_var_name: &str, model: &str) -> Self {
        Self::Gemini {
            api_key: api_key_env_var_name.to_string(),
            model: model.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    pub fn anthropic(api_key_env_var_name: &str, model: &str) -> Self {
        Self::Anthropic {
            api_key: api_key_env_var_name.to_string(),
            model: model.to_string(),
            base_url: ANTHROPIC_API_BASE.to_string(),
        }
    }

    /// Points the provider at another host, e.g. a proxy.
    pub fn with_base_url(mut self, url: &str) -> Self {
        match &mut self {
            Provider::Gemini { base_url, .. } | Provider::Anthropic { base_url, .. } => {
                *base_url = url.trim_end_matches('/').to_string();
            }
        }
        self
    }

    pub fn available_models(&self) -> Vec<AvailableModel> {
        match self {
            Provider::Gemini { .. } => GEMINI_MODELS.to_vec(),
            Provider::Anthropic { .. } => ANTHROPIC_MODELS.to_vec(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini { .. } => "gemini",
            Provider::Anthropic { .. } => "anthropic",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::Gemini { model, .. } | Provider::Anthropic { model, .. } => model,
        }
    }

    fn api_key_env_var(&self) -> &str {
        match self {
            Provider::Gemini { api_key, .. } | Provider::Anthropic { api_key, .. } => api_key,
        }
    }

    fn resolve_api_key(&self) -> Result<String, ApiConnectionError> {
        dotenv().ok();
        let name = self.api_key_env_var();
        match env::var(name) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ApiConnectionError::MissingApiKey(name.to_string())),
        }
    }

    /// Builds the vendor request without sending it.
    pub fn build_request(
        &self,
        client: &Client,
        api_key: &str,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<reqwest::Request, ApiConnectionError> {
        let request = match self {
            Provider::Gemini {
                model, base_url, ..
            } => {
                let url = format!("{}/v1beta/models/{}:generateContent", base_url, model);
                let body = GeminiRequest {
                    contents: vec![GeminiContent {
                        role: Some("user".to_string()),
                        parts: vec![GeminiPart {
                            text: Some(prompt.to_string()),
                        }],
                    }],
                    generation_config: GeminiGenerationConfig {
                        response_mime_type: settings
                            .json_response
                            .then(|| "application/json".to_string()),
                        temperature: Some(settings.temperature),
                        max_output_tokens: Some(settings.max_tokens),
                    },
                };
                client
                    .post(url)
                    .header("x-goog-api-key", api_key)
                    .header("Content-Type", "application/json")
                    .json(&body)
            }
            Provider::Anthropic {
                model, base_url, ..
            } => {
                let url = format!("{}/v1/messages", base_url);
                let body = AnthropicRequest {
                    model: model.clone(),
                    max_tokens: settings.max_tokens,
                    messages: vec![ChatMessage {
                        role: "user".to_string(),
                        content: prompt.to_string(),
                    }],
                    temperature: Some(settings.temperature),
                };
                client
                    .post(url)
                    .header("x-api-key", api_key)
                    .header("anthropic-version", ANTHROPIC_VERSION)
                    .header("Content-Type", "application/json")
                    .json(&body)
            }
        };
        Ok(request.build()?)
    }

    /// Turns a vendor reply into model text or an error.
    pub fn read_reply(
        &self,
        status: reqwest::StatusCode,
        body: String,
    ) -> Result<String, ApiConnectionError> {
        match self {
            Provider::Gemini { .. } => {
                if !status.is_success() {
                    return Err(api_error::<GeminiErrorResponse>(status, body));
                }
                let parsed: GeminiResponse = serde_json::from_str(&body)?;
                if let Some(usage) = &parsed.usage_metadata {
                    tracing::debug!(
                        input_tokens = ?usage.prompt_token_count,
                        output_tokens = ?usage.candidates_token_count,
                        finish_reason = ?parsed.candidates.first().and_then(|c| c.finish_reason.as_deref()),
                        "gemini usage"
                    );
                }
                parsed
                    .text()
                    .ok_or_else(|| ApiConnectionError::EmptyResponse("gemini".to_string()))
            }
            Provider::Anthropic { .. } => {
                if !status.is_success() {
                    return Err(api_error::<AnthropicErrorResponse>(status, body));
                }
                let parsed: AnthropicResponse = serde_json::from_str(&body)?;
                if let Some(usage) = &parsed.usage {
                    tracing::debug!(
                        input_tokens = usage.input_tokens,
                        output_tokens = usage.output_tokens,
                        stop_reason = ?parsed.stop_reason,
                        "anthropic usage"
                    );
                }
                parsed
                    .text()
                    .ok_or_else(|| ApiConnectionError::EmptyResponse("anthropic".to_string()))
            }
        }
    }

    pub async fn call_generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, ApiConnectionError> {
        let actual_api_key = self.resolve_api_key()?;
        let client = Client::new();
        let request = self.build_request(&client, &actual_api_key, prompt, settings)?;

        tracing::debug!(provider = self.name(), model = %self.model(), url = %request.url().path(), "sending request");
        let response = client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        self.read_reply(status, body)
    }
}

/// Non-2xx reply: the vendor's message when the body parses, else the raw body.
fn api_error<E>(status: reqwest::StatusCode, body: String) -> ApiConnectionError
where
    E: DeserializeOwned + ProviderErrorBody,
{
    let error_body = serde_json::from_str::<E>(&body)
        .map(ProviderErrorBody::into_message)
        .unwrap_or(body);
    ApiConnectionError::ApiError { status, error_body }
}

#[async_trait]
impl CompletionBackend for Provider {
    async fn generate_text(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, ApiConnectionError> {
        self.call_generate(prompt, settings).await
    }

    fn provider_name(&self) -> &'static str {
        self.name()
    }

    fn model_name(&self) -> &str {
        self.model()
    }
}
