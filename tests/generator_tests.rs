use recipe_suggest::api_connection::{FakeBackend, GenerationSettings};
use recipe_suggest::generator::{GenerateError, RecipeGenerator};
use recipe_suggest::memo::RecipeMemo;
use recipe_suggest::prompt::PromptStyle;
use recipe_suggest::recipe_parser::RecipeParseError;
use recipe_suggest::selection::IngredientSelection;
use std::sync::Arc;

const THREE_RECIPES: &str = r#"{
  "recipes": [
    {"name": "Jajecznica", "preparation_time": "10 minut", "difficulty": "łatwy",
     "ingredients": [{"name": "jajka", "quantity": 3, "unit": "szt."}],
     "instructions": [{"step": 1, "description": "Roztrzep jajka."}, {"step": 2, "description": "Smaż."}],
     "suggestions": "Dodaj szczypiorek."},
    {"name": "Naleśniki", "preparation_time": "30 minut", "difficulty": "średni",
     "ingredients": [{"name": "mleko", "quantity": 1.5, "unit": "szklanki"}],
     "instructions": [{"step": 1, "description": "Wymieszaj ciasto."}],
     "suggestions": ""},
    {"name": "Kogel-mogel", "preparation_time": "5 minut", "difficulty": "łatwy",
     "ingredients": [{"name": "cukier", "quantity": "2 łyżki", "unit": null}],
     "instructions": [{"step": 1, "description": "Utrzyj."}],
     "suggestions": "Podawaj od razu."}
  ]
}"#;

const POLISH_RECIPE: &str = r#"```json
{"przepisy": [{"nazwa": "Placki ziemniaczane", "czas_przygotowania": "40 minut",
  "poziom_trudnosci": "średni",
  "skladniki": [{"nazwa": "ziemniaki", "ilosc": 1, "jednostka": "kg"}],
  "kroki": [{"numer": 1, "opis": "Zetrzyj ziemniaki."}],
  "sugestie": "Ze śmietaną."}]}
```"#;

fn settings() -> GenerationSettings {
    GenerationSettings {
        temperature: 0.4,
        max_tokens: 2000,
        json_response: true,
    }
}

fn generator(backend: FakeBackend) -> RecipeGenerator<FakeBackend> {
    RecipeGenerator::new(backend, PromptStyle::EnglishKeys, settings())
}

#[tokio::test]
async fn test_generates_three_recipes() {
    let mut generator = generator(FakeBackend::with_reply(THREE_RECIPES));
    let recipes = generator.generate("Jajka, Mleko").await.unwrap();
    assert_eq!(recipes.recipes.len(), 3);
    assert_eq!(recipes.recipes[1].name, "Naleśniki");
    assert_eq!(generator.backend().call_count(), 1);
}

#[tokio::test]
async fn test_prompt_receives_normalized_ingredients() {
    let mut generator = generator(FakeBackend::with_reply(THREE_RECIPES));
    generator.generate("  Mleko , jajka,MLEKO").await.unwrap();
    let prompts = generator.backend().prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("(\"jajka,mleko\")"), "prompt was: {}", prompts[0]);
}

#[tokio::test]
async fn test_equivalent_lists_hit_the_memo() {
    let mut generator = generator(FakeBackend::with_reply(THREE_RECIPES));
    let first = generator.generate("jajka, mleko").await.unwrap();
    let second = generator.generate("MLEKO,Jajka ").await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(generator.backend().call_count(), 1);
    assert_eq!(generator.memo().keys(), vec!["jajka,mleko"]);
}

#[tokio::test]
async fn test_different_lists_call_again() {
    let backend = FakeBackend::with_reply(THREE_RECIPES).then_reply(POLISH_RECIPE);
    let mut generator = generator(backend);
    generator.generate("jajka").await.unwrap();
    let second = generator.generate("ziemniaki").await.unwrap();
    assert_eq!(second.recipes[0].name, "Placki ziemniaczane");
    assert_eq!(generator.backend().call_count(), 2);
    assert_eq!(generator.memo().len(), 2);
}

#[tokio::test]
async fn test_empty_ingredients_never_reach_backend() {
    let mut generator = generator(FakeBackend::with_reply(THREE_RECIPES));
    let result = generator.generate(" , ,  ").await;
    assert!(matches!(result, Err(GenerateError::NoIngredients)));
    assert_eq!(generator.backend().call_count(), 0);
}

#[tokio::test]
async fn test_backend_failure_is_not_memoized() {
    let backend = FakeBackend::new().then_fail("503 service unavailable").then_reply(THREE_RECIPES);
    let mut generator = generator(backend);

    let failed = generator.generate("jajka").await;
    assert!(matches!(failed, Err(GenerateError::Api(_))));
    assert!(generator.memo().is_empty());

    let retried = generator.generate("jajka").await.unwrap();
    assert_eq!(retried.recipes.len(), 3);
    assert_eq!(generator.backend().call_count(), 2);
}

#[tokio::test]
async fn test_unreadable_reply_is_discarded() {
    let backend = FakeBackend::with_reply(r#"{"recipes": [{"name": "Pół przepisu"}]}"#)
        .then_reply("```json\n```");
    let mut generator = generator(backend);

    let partial = generator.generate("jajka").await;
    assert!(matches!(partial, Err(GenerateError::Parse(RecipeParseError::InvalidJson(_)))));
    let empty = generator.generate("jajka").await;
    assert!(matches!(empty, Err(GenerateError::Parse(RecipeParseError::EmptyContent))));
    assert!(!generator.memo().contains("jajka"));
}

#[tokio::test]
async fn test_native_style_prompt_and_reply() {
    let backend = FakeBackend::with_reply(POLISH_RECIPE);
    let mut generator = RecipeGenerator::new(backend, PromptStyle::NativeKeys, settings());
    let recipes = generator.generate("ziemniaki").await.unwrap();
    assert_eq!(recipes.recipes[0].suggestions, "Ze śmietaną.");
    assert!(generator.backend().prompts()[0].contains("czas_przygotowania"));
}

#[tokio::test]
async fn test_generate_for_selection() {
    let mut selection = IngredientSelection::new();
    selection.toggle("Jajka").unwrap();
    selection.add_custom("Świeży imbir");

    let mut generator = generator(FakeBackend::with_reply(THREE_RECIPES));
    generator.generate_for(&selection).await.unwrap();
    assert!(generator.memo().contains("jajka,świeży imbir"));
}

#[tokio::test]
async fn test_preloaded_memo_skips_backend() {
    let mut memo = RecipeMemo::new();
    memo.insert(
        "jajka".to_string(),
        recipe_suggest::recipe_parser::parse_recipe_set(THREE_RECIPES).unwrap(),
    );
    let mut generator = generator(FakeBackend::new()).with_memo(memo);
    let recipes = generator.generate("Jajka").await.unwrap();
    assert_eq!(recipes.recipes[0].name, "Jajecznica");
    assert_eq!(generator.backend().call_count(), 0);
}
