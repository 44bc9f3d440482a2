use std::io::{self, Write};

use serde::Serialize;

use crate::error::CookbookError;
use crate::protocol::{COOKBOOK_ERROR, INVALID_PARAMS};

#[derive(Serialize)]
struct JsonRpcResponse<'a> {
	jsonrpc: &'a str,
	id: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	result: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<JsonRpcErrorBody>,
}

#[derive(Serialize)]
struct JsonRpcErrorBody {
	code: i32,
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<serde_json::Value>,
}

/// Writes one JSON-RPC message per line. Stdout unless told otherwise.
pub struct NdjsonTransport<W: Write = io::Stdout> {
	writer: W,
}

impl Default for NdjsonTransport {
	fn default() -> Self {
		Self::new()
	}
}

impl NdjsonTransport {
	pub fn new() -> Self {
		Self {
			writer: io::stdout(),
		}
	}
}

impl<W: Write> NdjsonTransport<W> {
	pub fn with_writer(writer: W) -> Self {
		Self { writer }
	}

	pub fn into_inner(self) -> W {
		self.writer
	}

	pub fn write_response(&mut self, id: u64, result: serde_json::Value) {
		self.write_line(&JsonRpcResponse {
			jsonrpc: "2.0",
			id,
			result: Some(result),
			error: None,
		});
	}

	pub fn write_error(
		&mut self,
		id: u64,
		code: i32,
		message: impl Into<String>,
		data: Option<serde_json::Value>,
	) {
		self.write_line(&JsonRpcResponse {
			jsonrpc: "2.0",
			id,
			result: None,
			error: Some(JsonRpcErrorBody {
				code,
				message: message.into(),
				data,
			}),
		});
	}

	/// Answer a request with its outcome. Rejected input maps to
	/// invalid-params, everything else to the cookbook error code.
	pub fn write_result(&mut self, id: u64, result: Result<serde_json::Value, CookbookError>) {
		match result {
			Ok(value) => self.write_response(id, value),
			Err(e) => {
				let code = if e.is_client_error() {
					INVALID_PARAMS
				} else {
					COOKBOOK_ERROR
				};
				self.write_error(id, code, e.to_string(), Some(e.to_json_rpc_error()));
			}
		}
	}

	fn write_line(&mut self, value: &impl Serialize) {
		if let Err(e) = serde_json::to_writer(&mut self.writer, value) {
			tracing::error!("Failed to serialize: {}", e);
			return;
		}
		if let Err(e) = writeln!(self.writer).and_then(|_| self.writer.flush()) {
			tracing::error!("Failed to write response: {}", e);
		}
	}
}
