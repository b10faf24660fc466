use clap::ValueEnum;
use std::fmt::Write;

use crate::api_connection::endpoints::AvailableModel;
use crate::catalog::{Category, CATALOG, CUSTOM_CATEGORY_ICON, CUSTOM_CATEGORY_NAME};
use crate::recipe_parser::{Recipe, RecipeSet};
use crate::selection::IngredientSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Recipe cards.
    #[default]
    Text,
    /// Plain blocks meant for pasting elsewhere.
    Copy,
    Json,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Plain-text block for copying one recipe.
pub fn copy_text(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Przepis: {}", recipe.name);
    let _ = writeln!(out, "Czas przygotowania: {}", recipe.preparation_time);
    let _ = writeln!(out, "Poziom trudności: {}", recipe.difficulty);
    out.push_str("\nSkładniki:\n");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "- {} {} {}", ingredient.quantity.raw(), ingredient.unit, ingredient.name);
    }
    out.push_str("\nSposób przygotowania:\n");
    for step in &recipe.steps {
        let _ = writeln!(out, "{}. {}", step.number, step.description);
    }
    if recipe.has_suggestions() {
        let _ = writeln!(out, "\nSugestie:\n{}", recipe.suggestions);
    }
    out
}

pub fn render_recipe(index: usize, recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### {}. {}", index, recipe.name);
    let _ = writeln!(out, "Czas przygotowania: {}", recipe.preparation_time);
    let _ = writeln!(out, "Poziom trudności: {}", capitalize(&recipe.difficulty));
    out.push_str("\n##### 🥑 Składniki:\n");
    for ingredient in &recipe.ingredients {
        let line = format!("- **{}**: {} {}", ingredient.name, ingredient.quantity, ingredient.unit);
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out.push_str("\n##### 📝 Sposób przygotowania:\n");
    for step in recipe.sorted_steps() {
        let _ = writeln!(out, "**Krok {}:** {}", step.number, step.description);
    }
    if recipe.has_suggestions() {
        let _ = writeln!(out, "\n💡 Sugestie i warianty:\n{}", recipe.suggestions.trim());
    }
    out
}

pub fn render_recipe_set(set: &RecipeSet, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(set)?),
        OutputFormat::Copy => Ok(set
            .recipes
            .iter()
            .map(copy_text)
            .collect::<Vec<_>>()
            .join("\n---\n\n")),
        OutputFormat::Text => {
            let mut out = String::from("📋 Twoje propozycje przepisów\n\n");
            for (idx, recipe) in set.recipes.iter().enumerate() {
                out.push_str(&render_recipe(idx + 1, recipe));
                out.push('\n');
            }
            Ok(out)
        }
    }
}

pub fn render_selection(selection: &IngredientSelection) -> String {
    if selection.is_empty() {
        return "👈 Zacznij wybierać składniki (toggle <nazwa>) albo dodaj własne (add <nazwa>).\n"
            .to_string();
    }

    let mut out = String::from("🛒 Twoje wybrane składniki\n");
    for (category, items) in selection.grouped() {
        let _ = writeln!(out, "{} {}", category.icon, category.name);
        for item in items {
            let _ = writeln!(out, "   • {}", item);
        }
    }
    if !selection.custom().is_empty() {
        let _ = writeln!(out, "{} {}", CUSTOM_CATEGORY_ICON, CUSTOM_CATEGORY_NAME);
        for item in selection.custom() {
            let _ = writeln!(out, "   • {}", item);
        }
    }
    out
}

pub fn render_category(category: &Category, selection: Option<&IngredientSelection>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", category.icon, category.name);
    for item in category.items {
        let mark = match selection {
            Some(s) if s.contains(item) => "[x]",
            Some(_) => "[ ]",
            None => "-",
        };
        let _ = writeln!(out, "   {} {}", mark, item);
    }
    out
}

pub fn render_catalog(selection: Option<&IngredientSelection>) -> String {
    CATALOG
        .iter()
        .map(|c| render_category(c, selection))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Known models for one provider, the configured one marked with `*`.
pub fn render_models(models: &[AvailableModel], current: &str) -> String {
    let mut out = String::new();
    for model in models {
        let marker = if model.model_name == current { '*' } else { ' ' };
        let _ = writeln!(out, "{} {} ({})", marker, model.model_name, model.provider);
    }
    if !models.iter().any(|m| m.model_name == current) {
        let _ = writeln!(out, "* {} (spoza listy)", current);
    }
    out
}
