use anyhow::{bail, Context, Result};
use recipe_suggest::api_connection::Provider;
use recipe_suggest::catalog;
use recipe_suggest::cli::{parse_args, Command};
use recipe_suggest::config::Settings;
use recipe_suggest::generator::RecipeGenerator;
use recipe_suggest::memo::RecipeMemo;
use recipe_suggest::render::{self, OutputFormat};
use recipe_suggest::selection::IngredientSelection;
use recipe_suggest::session::run_persisted_session;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("recipe_suggest=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn build_generator(settings: &Settings) -> Result<RecipeGenerator<Provider>> {
    let memo = match &settings.cache_file {
        Some(path) => RecipeMemo::load(path, &settings.memo_scope()).await?,
        None => RecipeMemo::new(),
    };
    Ok(RecipeGenerator::new(settings.provider(), settings.style, settings.generation.clone()).with_memo(memo))
}

async fn persist_memo(settings: &Settings, generator: &RecipeGenerator<Provider>) -> Result<()> {
    if let Some(path) = &settings.cache_file {
        generator
            .memo()
            .save(path, &settings.memo_scope())
            .await
            .with_context(|| format!("Failed to save answers to '{}'", path.display()))?;
    }
    Ok(())
}

async fn generate_once(
    settings: &Settings,
    ingredients: Option<String>,
    select: Vec<String>,
    custom: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut selection = IngredientSelection::new();
    for item in &select {
        if !selection.contains(item) {
            selection.toggle(item)?;
        }
    }
    for item in ingredients.iter().flat_map(|s| s.split(',')).chain(custom.iter().map(String::as_str)) {
        selection.add_custom(item);
    }
    if selection.is_empty() {
        bail!("Podaj składniki: --ingredients, --select lub --custom");
    }

    let mut generator = build_generator(settings).await?;
    let recipes = generator
        .generate_for(&selection)
        .await
        .context("Wystąpił błąd podczas generowania przepisów")?;
    println!("{}", render::render_recipe_set(&recipes, format)?);

    persist_memo(settings, &generator).await
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env file for API keys
    init_tracing();

    let cli_args = parse_args();
    let settings = Settings::from_cli(&cli_args);
    tracing::debug!(?settings, "resolved settings");

    match cli_args.command {
        Command::Generate {
            ingredients,
            select,
            custom,
            format,
        } => generate_once(&settings, ingredients, select, custom, format).await?,
        Command::Categories { name } => match name {
            Some(name) => {
                let category = catalog::find_category(&name)
                    .with_context(|| format!("Unknown category '{}'", name))?;
                print!("{}", render::render_category(category, None));
            }
            None => println!("{}", render::render_catalog(None)),
        },
        Command::Models => {
            let provider = settings.provider();
            print!("{}", render::render_models(&provider.available_models(), provider.model()));
        }
        Command::Interactive => {
            let mut generator = build_generator(&settings).await?;
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            let scope = settings.memo_scope();
            let memo_file = settings.cache_file.as_deref().map(|path| (path, scope.as_str()));
            run_persisted_session(&mut generator, stdin, &mut stdout, memo_file).await?;
        }
    }

    Ok(())
}
