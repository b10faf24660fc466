use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ProviderKind;
use crate::prompt::PromptStyle;
use crate::render::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Suggests three recipes for the ingredients you have", long_about = None)]
pub struct Cli {
    /// LLM provider to ask
    #[arg(long, global = true, value_enum, env = "RECIPE_PROVIDER", default_value_t = ProviderKind::Gemini)]
    pub provider: ProviderKind,

    /// Model name; defaults depend on the provider
    #[arg(long, global = true, env = "RECIPE_MODEL")]
    pub model: Option<String>,

    /// Environment variable that holds the API key
    #[arg(long, global = true)]
    pub api_key_env: Option<String>,

    /// Override the provider's API host
    #[arg(long, global = true, env = "RECIPE_API_BASE")]
    pub base_url: Option<String>,

    /// Key names requested from the model
    #[arg(long, global = true, value_enum, default_value_t = PromptStyle::EnglishKeys)]
    pub style: PromptStyle,

    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// JSON file that keeps answers between runs, kept apart per provider,
    /// model and style
    #[arg(long, global = true, env = "RECIPE_CACHE_FILE")]
    pub cache_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate recipes once and print them
    Generate {
        /// Comma-separated ingredients
        #[arg(short, long)]
        ingredients: Option<String>,

        /// Catalog item to include (repeatable)
        #[arg(short, long = "select")]
        select: Vec<String>,

        /// Free-text ingredient to include (repeatable)
        #[arg(short, long = "custom")]
        custom: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the ingredient catalog
    Categories {
        /// Show only this category
        name: Option<String>,
    },
    /// Pick ingredients and generate recipes from a prompt
    Interactive,
    /// List known models for the selected provider
    Models,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_collects_repeated_flags() {
        let cli = Cli::parse_from([
            "recipe_suggest",
            "generate",
            "--select",
            "Jajka",
            "--select",
            "Mleko",
            "--custom",
            "Natka",
            "--format",
            "copy",
        ]);
        match cli.command {
            Command::Generate {
                ingredients,
                select,
                custom,
                format,
            } => {
                assert!(ingredients.is_none());
                assert_eq!(select, vec!["Jajka", "Mleko"]);
                assert_eq!(custom, vec!["Natka"]);
                assert_eq!(format, OutputFormat::Copy);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["recipe_suggest", "interactive", "--style", "native-keys"]);
        assert_eq!(cli.style, PromptStyle::NativeKeys);
        assert!(matches!(cli.command, Command::Interactive));
    }

    #[test]
    fn models_takes_the_global_provider() {
        let cli = Cli::parse_from(["recipe_suggest", "models", "--provider", "anthropic"]);
        assert_eq!(cli.provider, ProviderKind::Anthropic);
        assert!(matches!(cli.command, Command::Models));
    }
}
