// ---------------------------------------------------------------------------
// Integration tests for cookbook-engine JSON-RPC 2.0 / NDJSON protocol
// ---------------------------------------------------------------------------
//
// Each test spawns a fresh cookbook-engine binary over its own temporary data
// directory and talks to it through stdin/stdout.
// ---------------------------------------------------------------------------

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

struct CookbookProcess {
	child: Child,
	reader: BufReader<std::process::ChildStdout>,
	next_id: AtomicU64,
}

impl CookbookProcess {
	fn spawn(data_dir: &Path, page_limit: Option<&str>) -> Self {
		let bin = env!("CARGO_BIN_EXE_cookbook-engine");
		let mut command = Command::new(bin);
		command
			.env("COOKBOOK_DATA_DIR", data_dir)
			.env_remove("COOKBOOK_PAGE_LIMIT")
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::null());
		if let Some(limit) = page_limit {
			command.env("COOKBOOK_PAGE_LIMIT", limit);
		}
		let mut child = command.spawn().expect("failed to spawn cookbook-engine");

		let stdout = child.stdout.take().expect("no stdout");
		let reader = BufReader::new(stdout);

		Self {
			child,
			reader,
			next_id: AtomicU64::new(1),
		}
	}

	fn write_raw(&mut self, line: &str) {
		let stdin = self.child.stdin.as_mut().expect("no stdin");
		stdin.write_all(line.as_bytes()).unwrap();
		stdin.write_all(b"\n").unwrap();
		stdin.flush().unwrap();
	}

	fn send(&mut self, method: &str, params: Value) -> RpcResponse {
		let id = self.next_id.fetch_add(1, Ordering::SeqCst);
		let request = json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": method,
			"params": params,
		});
		self.write_raw(&serde_json::to_string(&request).unwrap());

		loop {
			let mut buf = String::new();
			let bytes_read = self
				.reader
				.read_line(&mut buf)
				.expect("failed to read from stdout");
			if bytes_read == 0 {
				panic!("unexpected EOF while waiting for response to id={}", id);
			}
			let buf = buf.trim();
			if buf.is_empty() {
				continue;
			}
			let parsed: Value = serde_json::from_str(buf)
				.unwrap_or_else(|e| panic!("invalid JSON from engine: {e}\nline: {buf}"));
			let resp_id = parsed["id"].as_u64().expect("response id is not u64");
			assert_eq!(resp_id, id, "response id mismatch");
			if let Some(error) = parsed.get("error") {
				return RpcResponse::Error(error.clone());
			}
			return RpcResponse::Ok(parsed.get("result").cloned().unwrap_or(Value::Null));
		}
	}

	fn call(&mut self, method: &str, params: Value) -> Value {
		match self.send(method, params) {
			RpcResponse::Ok(v) => v,
			RpcResponse::Error(e) => panic!("expected success, got error: {e}"),
		}
	}

	fn call_err(&mut self, method: &str, params: Value) -> Value {
		match self.send(method, params) {
			RpcResponse::Error(e) => e,
			RpcResponse::Ok(v) => panic!("expected error, got success: {v}"),
		}
	}

	fn add(&mut self, name: &str, ingredients: &[&str]) {
		self.call(
			"recipes/add",
			json!({
				"url": "abcdefg",
				"name": name,
				"ingredients": ingredients,
				"tags": [],
			}),
		);
	}
}

impl Drop for CookbookProcess {
	fn drop(&mut self) {
		drop(self.child.stdin.take());
		let _ = self.child.wait();
	}
}

#[derive(Debug)]
enum RpcResponse {
	Ok(Value),
	Error(Value),
}

fn recipe_names(result: &Value) -> Vec<String> {
	result["recipes"]
		.as_array()
		.expect("recipes should be an array")
		.iter()
		.map(|r| r["name"].as_str().unwrap().to_string())
		.collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn fresh_directory_is_empty() {
	let dir = tempfile::tempdir().unwrap();
	let mut proc = CookbookProcess::spawn(dir.path(), None);

	assert_eq!(proc.call("recipes/list", json!({})), json!({ "recipes": [] }));
	assert_eq!(proc.call("ingredients/list", json!({})), json!({ "ingredients": [] }));
}

#[test]
fn add_recipe_stores_normalized_record() {
	let dir = tempfile::tempdir().unwrap();
	let mut proc = CookbookProcess::spawn(dir.path(), None);

	let result = proc.call(
		"recipes/add",
		json!({
			"url": " https://example.com/omelet ",
			"name": " Cheese Omelet ",
			"ingredients": ["Eggs", " CHEESE ", "oil", "salt"],
			"tags": [" Breakfast "],
		}),
	);
	assert_eq!(result, json!({}));

	let listed = proc.call("recipes/list", json!({}));
	assert_eq!(
		listed,
		json!({ "recipes": [{
			"url": "https://example.com/omelet",
			"name": "Cheese Omelet",
			"ingredients": ["eggs", "cheese", "oil", "salt"],
			"tags": ["breakfast"],
		}] })
	);

	let ingredients = proc.call("ingredients/list", json!({}));
	assert_eq!(
		ingredients,
		json!({ "ingredients": ["cheese", "eggs", "oil", "salt"] })
	);
}

#[test]
fn invalid_recipe_reports_every_field() {
	let dir = tempfile::tempdir().unwrap();
	let mut proc = CookbookProcess::spawn(dir.path(), None);

	let error = proc.call_err(
		"recipes/add",
		json!({ "url": " 1234 ", "name": "abc", "ingredients": ["x"], "tags": [] }),
	);
	assert_eq!(error["code"], -32602);
	assert_eq!(error["data"]["cookbookCode"], "COOKBOOK_VALIDATION");
	let fields: Vec<&str> = error["data"]["violations"]
		.as_array()
		.unwrap()
		.iter()
		.map(|v| v["field"].as_str().unwrap())
		.collect();
	assert_eq!(fields, vec!["url", "name"]);

	assert_eq!(proc.call("recipes/list", json!({})), json!({ "recipes": [] }));
	assert_eq!(proc.call("ingredients/list", json!({})), json!({ "ingredients": [] }));
}

#[test]
fn search_ranks_by_ingredients_ignoring_query_case() {
	let dir = tempfile::tempdir().unwrap();
	let mut proc = CookbookProcess::spawn(dir.path(), None);

	proc.add("Garlic Bread", &["bread", "garlic"]);
	proc.add("Omelet", &["eggs", "onion", "salt", "pepper"]);
	proc.add("Turkey Roast", &["turkey", "onion", "salt"]);
	proc.add("Hash Browns", &["eggs", "potato", "flour", "salt"]);
	proc.add("Cookies", &["eggs", "flour", "sugar"]);

	let result = proc.call(
		"recipes/search",
		json!({ "ingredients": ["EGGS", "SalT", "fLOUr", "sugar"] }),
	);
	assert_eq!(
		recipe_names(&result),
		vec!["Cookies", "Hash Browns", "Omelet", "Turkey Roast", "Garlic Bread"]
	);
	assert!(result["recipes"][0].get("score").is_none());
}

#[test]
fn search_by_word_in_title() {
	let dir = tempfile::tempdir().unwrap();
	let mut proc = CookbookProcess::spawn(dir.path(), None);

	for name in [
		"Garlic Bread",
		"Omelet",
		"Turkey Roast",
		"Roast Beef",
		"Roasted Pineapple",
		"Preroasted apples",
		"Cookies",
	] {
		proc.add(name, &[]);
	}

	let result = proc.call("recipes/search", json!({ "name": "cookie" }));
	assert_eq!(recipe_names(&result), vec!["Cookies"]);

	let result = proc.call("recipes/search", json!({ "name": "roast" }));
	assert_eq!(
		recipe_names(&result),
		vec!["Turkey Roast", "Roast Beef", "Roasted Pineapple"]
	);
}

#[test]
fn page_limit_applies_to_list_and_search() {
	let dir = tempfile::tempdir().unwrap();
	let mut proc = CookbookProcess::spawn(dir.path(), Some("5"));

	for n in 1..=7 {
		proc.add(&n.to_string().repeat(6), &[]);
	}

	let expected = vec!["111111", "222222", "333333", "444444", "555555"];
	assert_eq!(recipe_names(&proc.call("recipes/list", json!({}))), expected);
	assert_eq!(recipe_names(&proc.call("recipes/search", json!({}))), expected);
}

#[test]
fn non_numeric_page_limit_returns_everything() {
	let dir = tempfile::tempdir().unwrap();
	let mut proc = CookbookProcess::spawn(dir.path(), Some("lots"));

	for n in 1..=7 {
		proc.add(&n.to_string().repeat(6), &[]);
	}
	assert_eq!(recipe_names(&proc.call("recipes/list", json!({}))).len(), 7);
}

#[test]
fn data_survives_restart() {
	let dir = tempfile::tempdir().unwrap();
	{
		let mut proc = CookbookProcess::spawn(dir.path(), None);
		proc.add("French Toast", &["bread", "eggs"]);
	}

	let mut proc = CookbookProcess::spawn(dir.path(), None);
	assert_eq!(
		recipe_names(&proc.call("recipes/list", json!({}))),
		vec!["French Toast"]
	);
	assert_eq!(
		proc.call("ingredients/list", json!({})),
		json!({ "ingredients": ["bread", "eggs"] })
	);
}

#[test]
fn corrupt_storage_reads_as_empty() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("recipes.txt"), "[{\"url\": ").unwrap();
	std::fs::write(dir.path().join("ingredients.txt"), "not json").unwrap();

	let mut proc = CookbookProcess::spawn(dir.path(), None);
	assert_eq!(proc.call("recipes/list", json!({})), json!({ "recipes": [] }));
	assert_eq!(proc.call("ingredients/list", json!({})), json!({ "ingredients": [] }));

	proc.add("Fresh Start", &["Water"]);
	assert_eq!(recipe_names(&proc.call("recipes/list", json!({}))), vec!["Fresh Start"]);
}

#[test]
fn unknown_method_and_bad_lines() {
	let dir = tempfile::tempdir().unwrap();
	let mut proc = CookbookProcess::spawn(dir.path(), None);

	// Garbage and blank lines are skipped without a response.
	proc.write_raw("this is not json");
	proc.write_raw("");

	let error = proc.call_err("recipes/delete", json!({}));
	assert_eq!(error["code"], -32601);

	let error = proc.call_err("recipes/add", json!({ "name": "Missing the rest" }));
	assert_eq!(error["code"], -32602);
	assert_eq!(error["data"]["cookbookCode"], "COOKBOOK_INVALID_PARAMS");
}
