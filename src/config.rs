use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

use crate::api_connection::connection::{ANTHROPIC_API_KEY_ENV_VAR, GEMINI_API_KEY_ENV_VAR};
use crate::api_connection::{GenerationSettings, Provider};
use crate::cli::Cli;
use crate::prompt::PromptStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProviderKind {
    #[default]
    Gemini,
    Anthropic,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl ProviderKind {
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-2.5-pro-preview-03-25",
            ProviderKind::Anthropic => "claude-3-5-sonnet-20241022",
        }
    }

    pub fn default_api_key_env(self) -> &'static str {
        match self {
            ProviderKind::Gemini => GEMINI_API_KEY_ENV_VAR,
            ProviderKind::Anthropic => ANTHROPIC_API_KEY_ENV_VAR,
        }
    }

    pub fn default_settings(self) -> GenerationSettings {
        match self {
            ProviderKind::Gemini => GenerationSettings {
                temperature: 0.4,
                max_tokens: 2000,
                json_response: true,
            },
            ProviderKind::Anthropic => GenerationSettings {
                temperature: 0.7,
                max_tokens: 4096,
                json_response: true,
            },
        }
    }
}

/// Everything needed to build a generator, after flags, environment and
/// per-provider defaults have been merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub style: PromptStyle,
    pub generation: GenerationSettings,
    pub cache_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        let provider = cli.provider;
        let mut generation = provider.default_settings();
        if let Some(temperature) = cli.temperature {
            generation.temperature = temperature;
        }
        if let Some(max_tokens) = cli.max_tokens {
            generation.max_tokens = max_tokens;
        }

        Settings {
            provider,
            model: cli
                .model
                .clone()
                .unwrap_or_else(|| provider.default_model().to_string()),
            api_key_env: cli
                .api_key_env
                .clone()
                .unwrap_or_else(|| provider.default_api_key_env().to_string()),
            base_url: cli.base_url.clone(),
            style: cli.style,
            generation,
            cache_file: cli.cache_file.clone(),
        }
    }

    /// Section of the memo file these settings read and write. Answers from
    /// another provider, model or prompt style never leak into this one.
    pub fn memo_scope(&self) -> String {
        format!("{}/{}/{}", self.provider, self.model, self.style)
    }

    pub fn provider(&self) -> Provider {
        let provider = match self.provider {
            ProviderKind::Gemini => Provider::gemini(&self.api_key_env, &self.model),
            ProviderKind::Anthropic => Provider::anthropic(&self.api_key_env, &self.model),
        };
        match &self.base_url {
            Some(url) => provider.with_base_url(url),
            None => provider,
        }
    }
}
