use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use crate::catalog::{self, Category, CATALOG};

#[derive(Debug, PartialEq, Eq)]
pub enum SelectionError {
    NotInCatalog(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NotInCatalog(item) => {
                write!(f, "'{}' nie ma w katalogu składników (własne składniki dodaj poleceniem add)", item)
            }
        }
    }
}

impl Error for SelectionError {}

/// Ingredients picked so far: catalog items plus free-text additions.
#[derive(Debug, Clone, Default)]
pub struct IngredientSelection {
    selected: BTreeSet<String>,
    custom: Vec<String>,
}

impl IngredientSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips a catalog item and returns whether it is selected afterwards.
    pub fn toggle(&mut self, item: &str) -> Result<bool, SelectionError> {
        let canonical = catalog::canonical_item(item)
            .ok_or_else(|| SelectionError::NotInCatalog(item.trim().to_string()))?;
        if self.selected.remove(canonical) {
            Ok(false)
        } else {
            self.selected.insert(canonical.to_string());
            Ok(true)
        }
    }

    pub fn add_custom(&mut self, text: &str) -> bool {
        let item = text.trim();
        if item.is_empty() || self.contains(item) {
            return false;
        }
        self.custom.push(item.to_string());
        true
    }

    pub fn remove(&mut self, item: &str) -> bool {
        let wanted = item.trim().to_lowercase();
        let before = self.len();
        self.selected.retain(|s| s.to_lowercase() != wanted);
        self.custom.retain(|s| s.to_lowercase() != wanted);
        self.len() != before
    }

    pub fn contains(&self, item: &str) -> bool {
        let wanted = item.trim().to_lowercase();
        self.selected
            .iter()
            .chain(self.custom.iter())
            .any(|s| s.to_lowercase() == wanted)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.custom.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.custom.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len() + self.custom.len()
    }

    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// Catalog selections followed by custom additions in insertion order.
    pub fn all(&self) -> Vec<String> {
        self.selected
            .iter()
            .chain(self.custom.iter())
            .cloned()
            .collect()
    }

    /// Categories with at least one selected item, in catalog order.
    pub fn grouped(&self) -> Vec<(&'static Category, Vec<&str>)> {
        CATALOG
            .iter()
            .filter_map(|category| {
                let mut items: Vec<&str> = self
                    .selected
                    .iter()
                    .filter(|s| category.items.contains(&s.as_str()))
                    .map(String::as_str)
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    items.sort();
                    Some((category, items))
                }
            })
            .collect()
    }

    pub fn to_prompt_list(&self) -> String {
        let mut items: Vec<String> = self.all().iter().map(|s| s.trim().to_string()).collect();
        items.sort();
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_uses_catalog_spelling() {
        let mut selection = IngredientSelection::new();
        assert_eq!(selection.toggle("jajka"), Ok(true));
        assert_eq!(selection.all(), vec!["Jajka".to_string()]);
        assert_eq!(selection.toggle("JAJKA"), Ok(false));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_rejects_unknown_items() {
        let mut selection = IngredientSelection::new();
        assert_eq!(
            selection.toggle("smocze jajo"),
            Err(SelectionError::NotInCatalog("smocze jajo".to_string()))
        );
        assert_eq!(
            SelectionError::NotInCatalog("smocze jajo".to_string()).to_string(),
            "'smocze jajo' nie ma w katalogu składników (własne składniki dodaj poleceniem add)"
        );
    }

    #[test]
    fn custom_items_deduplicate_case_insensitively() {
        let mut selection = IngredientSelection::new();
        assert!(selection.add_custom("  świeży imbir "));
        assert!(!selection.add_custom("Świeży Imbir"));
        assert!(!selection.add_custom("   "));
        selection.toggle("Masło").unwrap();
        assert!(!selection.add_custom("masło"));
        assert_eq!(selection.custom(), &["świeży imbir".to_string()]);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn grouped_lists_only_populated_categories() {
        let mut selection = IngredientSelection::new();
        selection.toggle("Marchewka").unwrap();
        selection.toggle("Cebula").unwrap();
        selection.toggle("Sól").unwrap();
        selection.add_custom("Kiełbasa");

        let groups = selection.grouped();
        let names: Vec<&str> = groups.iter().map(|(c, _)| c.name).collect();
        assert_eq!(names, vec!["Przyprawy i dodatki smakowe", "Warzywa"]);
        assert_eq!(groups[1].1, vec!["Cebula", "Marchewka"]);
    }

    #[test]
    fn prompt_list_is_sorted_and_comma_joined() {
        let mut selection = IngredientSelection::new();
        selection.add_custom("Kiełbasa");
        selection.toggle("Cebula").unwrap();
        selection.toggle("Awokado").unwrap();
        assert_eq!(selection.to_prompt_list(), "Awokado, Cebula, Kiełbasa");
    }

    #[test]
    fn remove_and_clear() {
        let mut selection = IngredientSelection::new();
        selection.toggle("Tofu").unwrap();
        selection.add_custom("Natka");
        assert!(selection.remove("natka"));
        assert!(!selection.remove("natka"));
        selection.clear();
        assert!(selection.is_empty());
    }
}
