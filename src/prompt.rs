use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which key names the model is asked to use in its JSON reply. Parsing
/// accepts both, so this only changes the wording sent out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptStyle {
    #[default]
    EnglishKeys,
    NativeKeys,
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptStyle::EnglishKeys => write!(f, "english-keys"),
            PromptStyle::NativeKeys => write!(f, "native-keys"),
        }
    }
}

const ENGLISH_KEYS_SCHEMA: &str = r#"{
  "recipes": [
    {
      "name": "Nazwa przepisu 1",
      "preparation_time": "np. 30 minut",
      "difficulty": "łatwy",
      "ingredients": [
        { "name": "jajka", "quantity": 2, "unit": "szt." }
      ],
      "instructions": [
        { "step": 1, "description": "Pierwszy krok przygotowania." }
      ],
      "suggestions": "Dodatkowe sugestie."
    }
  ]
}"#;

pub fn build_prompt(style: PromptStyle, ingredients: &str) -> String {
    match style {
        PromptStyle::EnglishKeys => format!(
            "Na podstawie podanych składników (\"{ingredients}\") zaproponuj TRZY różne przepisy.\n\
             Każdy przepis powinien być inny.\n\
             Odpowiedz wyłącznie w formacie JSON zgodnym z poniższym schematem. Użyj angielskich nazw kluczy.\n\
             {schema}\n",
            schema = ENGLISH_KEYS_SCHEMA
        ),
        PromptStyle::NativeKeys => format!(
            "Na podstawie składników: {ingredients}\n\
             Wygeneruj TRZY różne przepisy kulinarne w formacie JSON\n\
             (obiekt z kluczem przepisy; każdy przepis z polami: nazwa, czas_przygotowania, poziom_trudnosci, \
             skladniki[nazwa, ilosc, jednostka], kroki[numer, opis], sugestie).\n\
             Odpowiadaj TYLKO w formacie JSON, po polsku."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_keys_prompt_embeds_schema_and_ingredients() {
        let prompt = build_prompt(PromptStyle::EnglishKeys, "jajka,mleko");
        assert!(prompt.contains("(\"jajka,mleko\")"));
        assert!(prompt.contains("TRZY"));
        assert!(prompt.contains("\"preparation_time\""));
        assert!(prompt.contains("angielskich nazw kluczy"));
    }

    #[test]
    fn native_keys_prompt_lists_polish_fields() {
        let prompt = build_prompt(PromptStyle::NativeKeys, "ser");
        assert!(prompt.starts_with("Na podstawie składników: ser\n"));
        assert!(prompt.contains("czas_przygotowania"));
        assert!(prompt.contains("kroki[numer, opis]"));
        assert!(!prompt.contains("preparation_time"));
    }

    #[test]
    fn style_names_round_trip_through_clap() {
        for style in [PromptStyle::EnglishKeys, PromptStyle::NativeKeys] {
            let parsed = PromptStyle::from_str(&style.to_string(), false).unwrap();
            assert_eq!(parsed, style);
        }
    }
}
