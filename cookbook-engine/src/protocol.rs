use serde::Deserialize;

// JSON-RPC 2.0 error codes
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const COOKBOOK_ERROR: i32 = -32000;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
	pub id: u64,
	pub method: String,
	#[serde(default)]
	pub params: serde_json::Value,
}

/// Methods understood by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	/// `recipes/list`: first page of stored recipes.
	ListRecipes,
	/// `recipes/search`: name filter, then ingredient ranking.
	SearchRecipes,
	/// `recipes/add`: validate and store one recipe.
	AddRecipe,
	/// `ingredients/list`: every known ingredient.
	ListIngredients,
}

impl Method {
	pub const ALL: [Method; 4] = [
		Method::ListRecipes,
		Method::SearchRecipes,
		Method::AddRecipe,
		Method::ListIngredients,
	];

	pub fn name(self) -> &'static str {
		match self {
			Self::ListRecipes => "recipes/list",
			Self::SearchRecipes => "recipes/search",
			Self::AddRecipe => "recipes/add",
			Self::ListIngredients => "ingredients/list",
		}
	}

	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|m| m.name() == name)
	}
}
