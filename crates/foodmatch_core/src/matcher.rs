//! crates/foodmatch_core/src/matcher.rs
//!
//! Matches a user's on-hand ingredients against recipe material lists.
//! Pure functions with no I/O, used for local ranking when no live API
//! search applies.

use crate::domain::{MatchReport, Recipe};

/// Decorative markers recipe authors prefix onto material lines
/// ("☆醤油 大さじ3" groups seasoning ingredients).
const MARKERS: &[char] = &['☆', '★', '○', '●', '◎', '※'];

/// Extracts the bare ingredient name from one material line: the token
/// before the first ASCII or ideographic space, markers stripped.
/// "☆醤油 大さじ3" becomes "醤油".
pub fn extract_material_name(material: &str) -> String {
    material
        .trim()
        .split([' ', '\u{3000}'])
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| !MARKERS.contains(c))
        .collect()
}

/// Computes which on-hand ingredients a recipe's materials cover.
///
/// An on-hand ingredient matches when it is a substring of some extracted
/// material name, so "卵" matches a "卵 3個" line and compound names.
pub fn match_recipe(on_hand: &[String], recipe: &Recipe) -> MatchReport {
    let names: Vec<String> = recipe
        .materials
        .iter()
        .map(|m| extract_material_name(m))
        .collect();

    if names.is_empty() {
        return MatchReport {
            matched: Vec::new(),
            missing: Vec::new(),
            match_ratio: 0.0,
            is_fully_coverable: true,
        };
    }

    let mut matched: Vec<String> = Vec::new();
    for item in on_hand {
        let item = item.trim();
        if item.is_empty() || matched.iter().any(|m| m == item) {
            continue;
        }
        if names.iter().any(|name| name.contains(item)) {
            matched.push(item.to_string());
        }
    }

    let missing: Vec<String> = names
        .iter()
        .filter(|name| !matched.iter().any(|item| name.contains(item.as_str())))
        .cloned()
        .collect();

    let match_ratio = matched.len() as f64 / recipe.materials.len() as f64;
    let is_fully_coverable = missing.is_empty();

    MatchReport {
        matched,
        missing,
        match_ratio,
        is_fully_coverable,
    }
}

/// Ranks `candidates` by descending match ratio against `on_hand`, dropping
/// recipes nothing matched. Ties keep the candidates' original order.
pub fn rank_by_match(on_hand: &[String], candidates: &[Recipe]) -> Vec<Recipe> {
    let mut scored: Vec<(f64, &Recipe)> = candidates
        .iter()
        .map(|recipe| (match_recipe(on_hand, recipe).match_ratio, recipe))
        .filter(|(ratio, _)| *ratio > 0.0)
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, recipe)| recipe.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Popularity;

    fn recipe(id: &str, materials: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: format!("recipe {id}"),
            image_url: String::new(),
            description: String::new(),
            source_url: String::new(),
            materials: materials.iter().map(|m| m.to_string()).collect(),
            instructions: Vec::new(),
            time_estimate: String::new(),
            cost_estimate: String::new(),
            popularity: Popularity::default(),
            author: String::new(),
            category_id: String::new(),
        }
    }

    fn on_hand(items: &[&str]) -> Vec<String> {
        items.iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn extracts_name_before_quantity_and_strips_markers() {
        assert_eq!(extract_material_name("卵 3個"), "卵");
        assert_eq!(extract_material_name("☆醤油 大さじ3"), "醤油");
        assert_eq!(extract_material_name("だし汁\u{3000}300ml"), "だし汁");
        assert_eq!(extract_material_name("塩こしょう"), "塩こしょう");
    }

    #[test]
    fn match_is_deterministic_for_the_fixed_example() {
        let recipe = recipe("1", &["卵 3個", "ご飯 200g"]);

        let report = match_recipe(&on_hand(&["卵"]), &recipe);

        assert_eq!(report.matched, vec!["卵"]);
        assert_eq!(report.missing, vec!["ご飯"]);
        assert!((report.match_ratio - 0.5).abs() < f64::EPSILON);
        assert!(!report.is_fully_coverable);
    }

    #[test]
    fn substring_matching_covers_compound_names() {
        let recipe = recipe("1", &["牛肉薄切り 200g"]);

        let report = match_recipe(&on_hand(&["牛肉"]), &recipe);

        assert_eq!(report.matched, vec!["牛肉"]);
        assert!(report.missing.is_empty());
        assert!(report.is_fully_coverable);
    }

    #[test]
    fn zero_materials_guard() {
        let recipe = recipe("1", &[]);

        let report = match_recipe(&on_hand(&["卵"]), &recipe);

        assert_eq!(report.match_ratio, 0.0);
        assert!(report.matched.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn duplicate_and_blank_on_hand_entries_are_ignored() {
        let recipe = recipe("1", &["卵 3個", "ご飯 200g"]);

        let report = match_recipe(&on_hand(&["卵", "卵", "  ", ""]), &recipe);

        assert_eq!(report.matched, vec!["卵"]);
    }

    #[test]
    fn ranking_orders_by_descending_ratio_and_drops_zero_matches() {
        let candidates = vec![
            recipe("none", &["豚肉 100g"]),
            recipe("half", &["卵 3個", "ご飯 200g"]),
            recipe("full", &["卵 1個"]),
        ];

        let ranked = rank_by_match(&on_hand(&["卵"]), &candidates);

        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["full", "half"]);
    }
}
