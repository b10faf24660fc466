use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt;

/// Amount of an ingredient as the model wrote it: `2`, `0.5` or `"szczypta"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Quantity {
    /// Full-precision form, used where the text is meant to be cooked from.
    pub fn raw(&self) -> String {
        match self {
            Quantity::Integer(n) => n.to_string(),
            Quantity::Number(n) => format!("{}", n),
            Quantity::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Integer(n) => write!(f, "{}", n),
            Quantity::Number(n) => write!(f, "{:.1}", n),
            Quantity::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    #[serde(alias = "nazwa")]
    pub name: String,
    #[serde(alias = "ilosc")]
    pub quantity: Quantity,
    #[serde(default, alias = "jednostka", deserialize_with = "null_as_empty")]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "step", alias = "numer", alias = "number", deserialize_with = "lenient_u32")]
    pub number: u32,
    #[serde(alias = "opis")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(alias = "nazwa")]
    pub name: String,
    #[serde(alias = "czas_przygotowania")]
    pub preparation_time: String,
    #[serde(alias = "poziom_trudnosci")]
    pub difficulty: String,
    #[serde(alias = "skladniki")]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(rename = "instructions", alias = "kroki", alias = "steps")]
    pub steps: Vec<Step>,
    #[serde(default, alias = "sugestie", deserialize_with = "null_as_empty")]
    pub suggestions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSet {
    #[serde(alias = "przepisy")]
    pub recipes: Vec<Recipe>,
}

impl Recipe {
    pub fn sorted_steps(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.number);
        steps
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.trim().is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .trim_end_matches('.')
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid step number '{}'", s))),
    }
}

#[derive(Debug)]
pub enum RecipeParseError {
    EmptyContent,
    InvalidJson(serde_json::Error),
    NoRecipes,
}

impl fmt::Display for RecipeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeParseError::EmptyContent => write!(f, "model returned empty content"),
            RecipeParseError::InvalidJson(err) => {
                write!(f, "model reply does not match the recipe schema: {}", err)
            }
            RecipeParseError::NoRecipes => write!(f, "model reply contains no recipes"),
        }
    }
}

impl Error for RecipeParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RecipeParseError::InvalidJson(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RecipeParseError {
    fn from(err: serde_json::Error) -> Self {
        RecipeParseError::InvalidJson(err)
    }
}

/// Drops a surrounding ```json / ``` fence if the model added one.
pub fn strip_code_fences(content: &str) -> &str {
    let mut text = content.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

pub fn parse_recipe_set(content: &str) -> Result<RecipeSet, RecipeParseError> {
    let content_str = strip_code_fences(content);
    if content_str.is_empty() {
        return Err(RecipeParseError::EmptyContent);
    }

    let value: serde_json::Value = serde_json::from_str(content_str)?;
    let set = if value.is_array() {
        RecipeSet {
            recipes: serde_json::from_value(value)?,
        }
    } else {
        serde_json::from_value(value)?
    };

    if set.recipes.is_empty() {
        return Err(RecipeParseError::NoRecipes);
    }
    Ok(set)
}
