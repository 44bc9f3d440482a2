use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cookbook-engine", about = "Recipe catalog served over JSON-RPC 2.0 / NDJSON stdio")]
pub struct CliArgs {
	/// Directory holding the `recipes.txt` and `ingredients.txt` collections
	#[arg(long, default_value = ".", env = "COOKBOOK_DATA_DIR")]
	pub data_dir: PathBuf,

	/// Maximum number of recipes returned by list and search.
	/// Unset, zero or non-numeric means no limit.
	#[arg(long, env = "COOKBOOK_PAGE_LIMIT")]
	pub page_limit: Option<String>,

	/// Log level (trace, debug, info, warn, error), used when RUST_LOG is unset
	#[arg(long, default_value = "info", env = "COOKBOOK_LOG_LEVEL")]
	pub log_level: String,
}

impl CliArgs {
	pub fn page_limit(&self) -> PageLimit {
		PageLimit::parse(self.page_limit.as_deref())
	}
}

/// Upper bound on the number of recipes in one response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLimit(Option<NonZeroUsize>);

impl PageLimit {
	pub fn unbounded() -> Self {
		Self(None)
	}

	pub fn bounded(max: NonZeroUsize) -> Self {
		Self(Some(max))
	}

	/// Interpret a raw setting. Anything that is not a positive integer
	/// leaves the page unbounded.
	pub fn parse(raw: Option<&str>) -> Self {
		let Some(raw) = raw else {
			return Self::unbounded();
		};
		match raw.trim().parse::<NonZeroUsize>() {
			Ok(max) => Self::bounded(max),
			Err(e) => {
				tracing::warn!(value = raw, error = %e, "ignoring invalid page limit, returning all recipes");
				Self::unbounded()
			}
		}
	}

	pub fn get(&self) -> Option<usize> {
		self.0.map(NonZeroUsize::get)
	}
}
