// ---------------------------------------------------------------------------
// Search and ranking
// ---------------------------------------------------------------------------
//
// Pure functions over slices of recipes. Every result is an owned copy, and
// ranking scores travel next to the recipe in `RankedRecipe` rather than
// inside it, so two searches over the same records never see each other's
// scores.
// ---------------------------------------------------------------------------

use regex::Regex;
use serde::Deserialize;

use crate::config::PageLimit;
use crate::recipe::{IngredientQuery, Recipe, NO_MATCH_SCORE};

/// A recipe paired with the score it got in one ranking pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecipe {
	pub recipe: Recipe,
	pub score: f64,
}

/// Parameters of a combined search. Both parts are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub ingredients: Vec<String>,
}

fn word_prefix_regex(query: &str) -> Option<Regex> {
	let pattern = format!(r"(?i)(?:^|\s){}", regex::escape(&query.to_lowercase()));
	match Regex::new(&pattern) {
		Ok(re) => Some(re),
		Err(e) => {
			tracing::warn!(error = %e, "name query could not be compiled");
			None
		}
	}
}

/// Recipes whose name contains `query` at the start of a word, ignoring case.
///
/// "roast" matches "Turkey Roast" and "Roasted Pineapple" but not
/// "Preroasted apples". An empty query matches everything.
pub fn filter_by_name(recipes: &[Recipe], query: &str) -> Vec<Recipe> {
	if query.is_empty() {
		return recipes.to_vec();
	}
	let Some(re) = word_prefix_regex(query) else {
		return Vec::new();
	};
	recipes
		.iter()
		.filter(|r| re.is_match(r.name()))
		.cloned()
		.collect()
}

/// Score every recipe against `query` and sort ascending by score.
///
/// The sort is stable, so tied recipes keep their input order; with an empty
/// query every recipe ties and the order is unchanged.
pub fn rank_by_ingredients(recipes: &[Recipe], query: &IngredientQuery) -> Vec<RankedRecipe> {
	if query.is_empty() {
		return recipes
			.iter()
			.map(|recipe| RankedRecipe {
				recipe: recipe.clone(),
				score: NO_MATCH_SCORE,
			})
			.collect();
	}
	let mut ranked: Vec<RankedRecipe> = recipes
		.iter()
		.map(|recipe| RankedRecipe {
			score: recipe.compute_match(query),
			recipe: recipe.clone(),
		})
		.collect();
	ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
	ranked
}

/// Name filter first, then ingredient ranking on what is left.
pub fn search(recipes: &[Recipe], query: &SearchQuery) -> Vec<RankedRecipe> {
	let matching = filter_by_name(recipes, &query.name);
	rank_by_ingredients(&matching, &IngredientQuery::new(&query.ingredients))
}

/// Truncate to the first page.
pub fn paginate<T>(mut items: Vec<T>, limit: PageLimit) -> Vec<T> {
	if let Some(max) = limit.get() {
		items.truncate(max);
	}
	items
}
