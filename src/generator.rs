use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::api_connection::{ApiConnectionError, CompletionBackend, GenerationSettings};
use crate::memo::RecipeMemo;
use crate::normalize::normalization_key;
use crate::prompt::{build_prompt, PromptStyle};
use crate::recipe_parser::{parse_recipe_set, RecipeParseError, RecipeSet};
use crate::selection::IngredientSelection;

#[derive(Debug)]
pub enum GenerateError {
    NoIngredients,
    Api(ApiConnectionError),
    Parse(RecipeParseError),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::NoIngredients => write!(f, "no ingredients given"),
            GenerateError::Api(err) => write!(f, "LLM request failed: {}", err),
            GenerateError::Parse(err) => write!(f, "could not read recipes: {}", err),
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GenerateError::NoIngredients => None,
            GenerateError::Api(err) => Some(err),
            GenerateError::Parse(err) => Some(err),
        }
    }
}

impl From<ApiConnectionError> for GenerateError {
    fn from(err: ApiConnectionError) -> Self {
        GenerateError::Api(err)
    }
}

impl From<RecipeParseError> for GenerateError {
    fn from(err: RecipeParseError) -> Self {
        GenerateError::Parse(err)
    }
}

pub struct RecipeGenerator<B: CompletionBackend> {
    backend: B,
    style: PromptStyle,
    settings: GenerationSettings,
    memo: RecipeMemo,
}

impl<B: CompletionBackend> RecipeGenerator<B> {
    pub fn new(backend: B, style: PromptStyle, settings: GenerationSettings) -> Self {
        Self {
            backend,
            style,
            settings,
            memo: RecipeMemo::new(),
        }
    }

    pub fn with_memo(mut self, memo: RecipeMemo) -> Self {
        self.memo = memo;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn memo(&self) -> &RecipeMemo {
        &self.memo
    }

    pub fn memo_mut(&mut self) -> &mut RecipeMemo {
        &mut self.memo
    }

    /// Three recipes for a comma-separated ingredient list. Lists with the
    /// same normalization key are answered from the memo; failed requests
    /// leave the memo untouched.
    pub async fn generate(&mut self, raw_ingredients: &str) -> Result<Arc<RecipeSet>, GenerateError> {
        let key = normalization_key(raw_ingredients);
        if key.is_empty() {
            return Err(GenerateError::NoIngredients);
        }

        if let Some(hit) = self.memo.get(&key) {
            tracing::debug!(key = %key, "recipe memo hit");
            return Ok(hit);
        }

        let prompt = build_prompt(self.style, &key);
        tracing::info!(
            provider = self.backend.provider_name(),
            model = self.backend.model_name(),
            style = %self.style,
            ingredients = %key,
            "requesting recipes"
        );

        let reply = self
            .backend
            .generate_text(&prompt, &self.settings)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "recipe request failed"))?;
        tracing::debug!(reply = %reply, "raw model reply");

        let recipes = parse_recipe_set(&reply)
            .inspect_err(|e| tracing::warn!(error = %e, "discarding unreadable model reply"))?;
        tracing::info!(count = recipes.recipes.len(), "recipes received");

        Ok(self.memo.insert(key, recipes))
    }

    pub async fn generate_for(
        &mut self,
        selection: &IngredientSelection,
    ) -> Result<Arc<RecipeSet>, GenerateError> {
        self.generate(&selection.to_prompt_list()).await
    }
}
