// ---------------------------------------------------------------------------
// Cookbook — recipe catalog operations
// ---------------------------------------------------------------------------
//
// Wires the flat-file stores to the recipe model and the search functions.
// Nothing is cached: every call reads its collection from disk, so two
// `Cookbook` values over the same directory always agree.
// ---------------------------------------------------------------------------

use std::path::PathBuf;

use serde_json::Value;

use crate::config::PageLimit;
use crate::error::CookbookError;
use crate::recipe::{Recipe, RecipeDraft};
use crate::search::{paginate, search, SearchQuery};
use crate::storage::{ObjectStore, PrimitiveStore};

pub const RECIPES_COLLECTION: &str = "recipes";
pub const INGREDIENTS_COLLECTION: &str = "ingredients";

#[derive(Debug, Clone)]
pub struct CookbookConfig {
	pub data_dir: PathBuf,
	pub page_limit: PageLimit,
}

pub struct Cookbook {
	recipes: ObjectStore<Value>,
	ingredients: PrimitiveStore<String>,
	page_limit: PageLimit,
}

impl Cookbook {
	pub fn new(config: CookbookConfig) -> Self {
		Self {
			recipes: ObjectStore::new(&config.data_dir, RECIPES_COLLECTION),
			ingredients: PrimitiveStore::new(&config.data_dir, INGREDIENTS_COLLECTION),
			page_limit: config.page_limit,
		}
	}

	/// All stored recipes that still decode and validate, in storage order.
	fn load_recipes(&self) -> Vec<Recipe> {
		let raw = self.recipes.read();
		let total = raw.len();
		let recipes: Vec<Recipe> = raw
			.into_iter()
			.enumerate()
			.filter_map(|(index, value)| match serde_json::from_value::<Recipe>(value) {
				Ok(recipe) => Some(recipe),
				Err(e) => {
					tracing::warn!(index, error = %e, "skipping invalid stored recipe");
					None
				}
			})
			.collect();
		tracing::debug!(total, loaded = recipes.len(), "recipes loaded");
		recipes
	}

	/// First page of recipes in storage order.
	pub fn list_recipes(&self) -> Vec<Recipe> {
		paginate(self.load_recipes(), self.page_limit)
	}

	/// First page of recipes matching `query`, best ingredient match first.
	pub fn search_recipes(&self, query: &SearchQuery) -> Vec<Recipe> {
		let ranked = search(&self.load_recipes(), query);
		paginate(ranked, self.page_limit)
			.into_iter()
			.map(|r| r.recipe)
			.collect()
	}

	/// Validate and store a recipe, then record its ingredients.
	///
	/// Nothing is written when validation fails.
	pub fn add_recipe(&self, draft: RecipeDraft) -> Result<Recipe, CookbookError> {
		let recipe = Recipe::new(draft)?;
		let record = serde_json::to_value(&recipe)
			.map_err(|e| CookbookError::Serialization(e.to_string()))?;
		self.recipes.create(record)?;
		self.ingredients.create(recipe.ingredients().iter().cloned())?;
		tracing::info!(name = recipe.name(), "recipe added");
		Ok(recipe)
	}

	/// Every ingredient ever submitted, lower-cased.
	pub fn list_ingredients(&self) -> Vec<String> {
		self.ingredients
			.read()
			.into_iter()
			.map(|i| i.to_lowercase())
			.collect()
	}
}
