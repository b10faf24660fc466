/// Trimmed, non-empty comma-separated parts, original spelling kept.
pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Memo key for an ingredient list: lower-cased, trimmed, sorted and
/// deduplicated parts joined with ','. Order and spacing of the input do not
/// matter, so "Jajka, mleko" and " mleko,jajka" share one entry.
pub fn normalization_key(raw: &str) -> String {
    let mut parts: Vec<String> = split_ingredients(raw)
        .into_iter()
        .map(|s| s.to_lowercase())
        .collect();
    parts.sort();
    parts.dedup();
    parts.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_order_case_and_spacing() {
        assert_eq!(normalization_key("Jajka, Mleko ,masło"), "jajka,masło,mleko");
        assert_eq!(
            normalization_key(" mleko,JAJKA,  Masło"),
            normalization_key("Jajka, Mleko ,masło")
        );
    }

    #[test]
    fn key_drops_empties_and_duplicates() {
        assert_eq!(normalization_key("ser, , Ser,,cebula"), "cebula,ser");
        assert_eq!(normalization_key("  ,  "), "");
        assert_eq!(normalization_key(""), "");
    }

    #[test]
    fn split_keeps_original_spelling() {
        assert_eq!(
            split_ingredients(" Ser żółty ,, Pomidory "),
            vec!["Ser żółty".to_string(), "Pomidory".to_string()]
        );
    }
}
