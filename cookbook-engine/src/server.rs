// ---------------------------------------------------------------------------
// CookbookServer — JSON-RPC dispatcher
// ---------------------------------------------------------------------------
//
// Reads JSON-RPC 2.0 requests (NDJSON over stdin), routes them to the
// `Cookbook`, and answers each on stdout through the transport. Requests are
// handled one at a time and share nothing but the files on disk.
// ---------------------------------------------------------------------------

use std::io::{self, BufRead, Write};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cookbook::Cookbook;
use crate::error::CookbookError;
use crate::protocol::{JsonRpcRequest, Method, METHOD_NOT_FOUND};
use crate::recipe::RecipeDraft;
use crate::search::SearchQuery;
use crate::transport::NdjsonTransport;

pub struct CookbookServer<W: Write = io::Stdout> {
	transport: NdjsonTransport<W>,
	cookbook: Cookbook,
}

impl<W: Write> CookbookServer<W> {
	pub fn new(transport: NdjsonTransport<W>, cookbook: Cookbook) -> Self {
		Self {
			transport,
			cookbook,
		}
	}

	pub fn into_transport(self) -> NdjsonTransport<W> {
		self.transport
	}

	/// Main loop: read JSON-RPC messages from stdin until EOF.
	pub fn run(&mut self) -> Result<(), CookbookError> {
		let stdin = io::stdin();
		self.serve(stdin.lock())
	}

	/// Serve every request line from `reader`.
	pub fn serve(&mut self, mut reader: impl BufRead) -> Result<(), CookbookError> {
		let mut buf = Vec::new();
		loop {
			buf.clear();
			if reader.read_until(b'\n', &mut buf)? == 0 {
				break;
			}
			let line = match std::str::from_utf8(&buf) {
				Ok(line) => line,
				Err(e) => {
					tracing::error!("Request line is not UTF-8: {}", e);
					continue;
				}
			};
			if line.trim().is_empty() {
				continue;
			}

			let request: JsonRpcRequest = match serde_json::from_str(line) {
				Ok(r) => r,
				Err(e) => {
					tracing::error!("Failed to parse request: {}", e);
					continue;
				}
			};

			self.dispatch(request);
		}

		Ok(())
	}

	fn dispatch(&mut self, req: JsonRpcRequest) {
		let id = req.id;
		let Some(method) = Method::from_name(&req.method) else {
			self.transport.write_error(
				id,
				METHOD_NOT_FOUND,
				format!("Unknown method: {}", req.method),
				None,
			);
			return;
		};

		tracing::debug!(id, method = method.name(), "request");
		let result = self.handle(method, req.params);
		if let Err(e) = &result {
			if !e.is_client_error() {
				tracing::error!(id, error = %e, "request failed");
			}
		}
		self.transport.write_result(id, result);
	}

	pub fn handle(&self, method: Method, params: Value) -> Result<Value, CookbookError> {
		match method {
			Method::ListRecipes => Ok(serde_json::json!({ "recipes": self.cookbook.list_recipes() })),
			Method::SearchRecipes => handle_search(&self.cookbook, params),
			Method::AddRecipe => handle_add(&self.cookbook, params),
			Method::ListIngredients => {
				Ok(serde_json::json!({ "ingredients": self.cookbook.list_ingredients() }))
			}
		}
	}
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, CookbookError> {
	serde_json::from_value(params).map_err(|e| CookbookError::InvalidParams(e.to_string()))
}

fn handle_search(cookbook: &Cookbook, params: Value) -> Result<Value, CookbookError> {
	let query: SearchQuery = if params.is_null() {
		SearchQuery::default()
	} else {
		parse_params(params)?
	};
	let recipes = cookbook.search_recipes(&query);
	Ok(serde_json::json!({ "recipes": recipes }))
}

fn handle_add(cookbook: &Cookbook, params: Value) -> Result<Value, CookbookError> {
	let draft: RecipeDraft = parse_params(params)?;
	cookbook.add_recipe(draft)?;
	Ok(serde_json::json!({}))
}
