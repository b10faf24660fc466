//! Line-driven ingredient picker that keeps its selection and the answer
//! memo alive between requests.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::api_connection::CompletionBackend;
use crate::catalog;
use crate::generator::RecipeGenerator;
use crate::render::{self, OutputFormat};
use crate::selection::IngredientSelection;

const HELP: &str = "\
Polecenia:
  toggle <składnik>     zaznacz/odznacz składnik z katalogu
  add <składnik>        dodaj własny składnik
  remove <składnik>     usuń składnik
  list                  pokaż wybrane składniki
  categories [nazwa]    pokaż katalog lub jedną kategorię
  clear                 wyczyść wybór i ostatnie przepisy
  generate              wygeneruj przepisy
  copy                  ostatnie przepisy w formie do skopiowania
  help                  ta pomoc
  quit                  zakończ
";

#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Toggle(String),
    Add(String),
    Remove(String),
    List,
    Categories(Option<String>),
    Clear,
    Generate,
    Copy,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = || (!rest.is_empty()).then(|| rest.to_string());

        match word.to_lowercase().as_str() {
            "" => SessionCommand::Empty,
            "toggle" | "t" => arg().map_or(SessionCommand::Unknown(line.to_string()), SessionCommand::Toggle),
            "add" | "a" => arg().map_or(SessionCommand::Unknown(line.to_string()), SessionCommand::Add),
            "remove" | "rm" => arg().map_or(SessionCommand::Unknown(line.to_string()), SessionCommand::Remove),
            "list" | "ls" => SessionCommand::List,
            "categories" | "cat" => SessionCommand::Categories(arg()),
            "clear" => SessionCommand::Clear,
            "generate" | "gen" | "g" => SessionCommand::Generate,
            "copy" => SessionCommand::Copy,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            _ => SessionCommand::Unknown(line.to_string()),
        }
    }
}

/// Runs until `quit` or end of input. Request failures are reported and the
/// session carries on with no recipes shown.
pub async fn run_session<B, R, W>(
    generator: &mut RecipeGenerator<B>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    B: CompletionBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut selection = IngredientSelection::new();
    let mut last_recipes = None;
    let mut lines = input.lines();

    writeln!(out, "🍳 Generator przepisów kulinarnych. Wpisz 'help', aby zobaczyć polecenia.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match SessionCommand::parse(&line) {
            SessionCommand::Empty => {}
            SessionCommand::Toggle(item) => match selection.toggle(&item) {
                Ok(true) => writeln!(out, "✔ {}", item)?,
                Ok(false) => writeln!(out, "✘ {}", item)?,
                Err(e) => writeln!(out, "Błąd: {}", e)?,
            },
            SessionCommand::Add(item) => {
                if selection.add_custom(&item) {
                    writeln!(out, "➕ {}", item.trim())?;
                } else {
                    writeln!(out, "'{}' jest już na liście.", item.trim())?;
                }
            }
            SessionCommand::Remove(item) => {
                if !selection.remove(&item) {
                    writeln!(out, "'{}' nie ma na liście.", item)?;
                }
            }
            SessionCommand::List => write!(out, "{}", render::render_selection(&selection))?,
            SessionCommand::Categories(None) => {
                writeln!(out, "{}", render::render_catalog(Some(&selection)))?
            }
            SessionCommand::Categories(Some(name)) => match catalog::find_category(&name) {
                Some(category) => {
                    write!(out, "{}", render::render_category(category, Some(&selection)))?
                }
                None => writeln!(out, "Nie ma kategorii '{}'.", name)?,
            },
            SessionCommand::Clear => {
                selection.clear();
                last_recipes = None;
            }
            SessionCommand::Generate => {
                if selection.is_empty() {
                    writeln!(out, "Najpierw wybierz składniki.")?;
                    continue;
                }
                writeln!(out, "🤖 Myślę nad przepisami...")?;
                match generator.generate_for(&selection).await {
                    Ok(recipes) => {
                        write!(out, "{}", render::render_recipe_set(&recipes, OutputFormat::Text)?)?;
                        last_recipes = Some(recipes);
                    }
                    Err(e) => {
                        last_recipes = None;
                        writeln!(out, "Błąd generowania przepisów: {}", e)?;
                        writeln!(out, "Spróbuj ponownie lub zmodyfikuj listę składników.")?;
                    }
                }
            }
            SessionCommand::Copy => match &last_recipes {
                Some(recipes) => {
                    writeln!(out, "{}", render::render_recipe_set(recipes, OutputFormat::Copy)?)?
                }
                None => writeln!(out, "Brak przepisów do skopiowania.")?,
            },
            SessionCommand::Help => write!(out, "{}", HELP)?,
            SessionCommand::Quit => break,
            SessionCommand::Unknown(line) => {
                writeln!(out, "Nieznane polecenie: '{}'. Wpisz 'help'.", line)?
            }
        }
    }

    Ok(())
}

/// `run_session`, then writes the memo to `memo_file` (path and scope) even
/// when the session ended with an error. The session error wins over a save
/// error.
pub async fn run_persisted_session<B, R, W>(
    generator: &mut RecipeGenerator<B>,
    input: R,
    out: &mut W,
    memo_file: Option<(&Path, &str)>,
) -> Result<()>
where
    B: CompletionBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let outcome = run_session(generator, input, out).await;
    if let Some((path, scope)) = memo_file {
        let saved = generator
            .memo()
            .save(path, scope)
            .await
            .with_context(|| format!("Failed to save answers to '{}'", path.display()));
        if outcome.is_err() {
            if let Err(e) = &saved {
                tracing::error!(error = %format!("{:#}", e), "memo not saved after session failure");
            }
            return outcome;
        }
        saved?;
    }
    outcome
}
