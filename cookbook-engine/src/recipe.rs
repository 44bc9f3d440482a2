// ---------------------------------------------------------------------------
// Recipe record — validation, normalization, match scoring
// ---------------------------------------------------------------------------
//
// A `Recipe` can only be obtained through `Recipe::new` (or deserialization,
// which routes through it), so every instance satisfies the length and
// normalization invariants. Construction runs a fixed pipeline:
//
//   trim every string -> check minimum lengths -> lower-case list fields
//
// `url` and `name` keep their casing. Scoring never touches the record; it
// returns a value the caller carries alongside it.
// ---------------------------------------------------------------------------

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length, in characters, of `url` and `name` after trimming.
pub const MIN_TEXT_LENGTH: usize = 5;

/// Score given to a recipe sharing no ingredient with the query. Sorts after
/// any real score.
pub const NO_MATCH_SCORE: f64 = 1.0e6;

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
	pub field: String,
	pub constraint: String,
}

impl FieldViolation {
	pub fn min_length(field: &str, min: usize) -> Self {
		Self {
			field: field.to_string(),
			constraint: format!("must be at least {} characters after trimming", min),
		}
	}
}

impl fmt::Display for FieldViolation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.field, self.constraint)
	}
}

/// Every field that failed validation, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid recipe: {}", join_violations(.violations))]
pub struct ValidationError {
	pub violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
	violations
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}

// ---------------------------------------------------------------------------
// Draft (raw input) and Recipe (validated)
// ---------------------------------------------------------------------------

/// Raw, unvalidated recipe fields as received from a client or read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
	pub url: String,
	pub name: String,
	pub ingredients: Vec<String>,
	pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecipeDraft")]
pub struct Recipe {
	url: String,
	name: String,
	ingredients: Vec<String>,
	tags: Vec<String>,
}

impl TryFrom<RecipeDraft> for Recipe {
	type Error = ValidationError;

	fn try_from(draft: RecipeDraft) -> Result<Self, Self::Error> {
		Self::new(draft)
	}
}

fn normalize_list(items: Vec<String>) -> Vec<String> {
	items
		.into_iter()
		.map(|item| item.trim().to_lowercase())
		.collect()
}

impl Recipe {
	/// Validate and normalize a draft. Reports all violating fields at once.
	pub fn new(draft: RecipeDraft) -> Result<Self, ValidationError> {
		let url = draft.url.trim().to_string();
		let name = draft.name.trim().to_string();

		let mut violations = Vec::new();
		if url.chars().count() < MIN_TEXT_LENGTH {
			violations.push(FieldViolation::min_length("url", MIN_TEXT_LENGTH));
		}
		if name.chars().count() < MIN_TEXT_LENGTH {
			violations.push(FieldViolation::min_length("name", MIN_TEXT_LENGTH));
		}
		if !violations.is_empty() {
			return Err(ValidationError { violations });
		}

		Ok(Self {
			url,
			name,
			ingredients: normalize_list(draft.ingredients),
			tags: normalize_list(draft.tags),
		})
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn ingredients(&self) -> &[String] {
		&self.ingredients
	}

	pub fn tags(&self) -> &[String] {
		&self.tags
	}

	/// Number of ingredients this recipe needs beyond those in `query`.
	///
	/// Both sides are compared as sets. Lower is better; a recipe sharing
	/// nothing with the query gets [`NO_MATCH_SCORE`].
	pub fn compute_match(&self, query: &IngredientQuery) -> f64 {
		let own: HashSet<&str> = self.ingredients.iter().map(String::as_str).collect();
		let common = own.iter().filter(|i| query.contains(i)).count();
		if common == 0 {
			NO_MATCH_SCORE
		} else {
			(own.len() - common) as f64
		}
	}
}

// ---------------------------------------------------------------------------
// IngredientQuery
// ---------------------------------------------------------------------------

/// A lower-cased, deduplicated set of ingredients to rank against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientQuery {
	items: HashSet<String>,
}

impl IngredientQuery {
	pub fn new<I, S>(items: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self {
			items: items.into_iter().map(|s| s.as_ref().to_lowercase()).collect(),
		}
	}

	pub fn contains(&self, ingredient: &str) -> bool {
		self.items.contains(ingredient)
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}
}
