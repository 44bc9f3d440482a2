use thiserror::Error;

use crate::recipe::ValidationError;

/// Failures of the flat-file layer. Reads never produce these; only writes do.
#[derive(Debug, Error)]
pub enum StorageError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CookbookError {
	#[error("{0}")]
	Validation(#[from] ValidationError),
	#[error("Invalid params: {0}")]
	InvalidParams(String),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Serialization error: {0}")]
	Serialization(String),
}

impl From<StorageError> for CookbookError {
	fn from(e: StorageError) -> Self {
		match e {
			StorageError::Io(io) => Self::Io(io),
			StorageError::Serialization(json) => Self::Serialization(json.to_string()),
		}
	}
}

impl CookbookError {
	pub fn code(&self) -> &str {
		match self {
			Self::Validation(_) => "COOKBOOK_VALIDATION",
			Self::InvalidParams(_) => "COOKBOOK_INVALID_PARAMS",
			Self::Io(_) => "COOKBOOK_IO",
			Self::Serialization(_) => "COOKBOOK_SERIALIZATION",
		}
	}

	/// True when the caller sent something we refuse, as opposed to a
	/// failure on our side.
	pub fn is_client_error(&self) -> bool {
		matches!(self, Self::Validation(_) | Self::InvalidParams(_))
	}

	pub fn to_json_rpc_error(&self) -> serde_json::Value {
		let mut data = serde_json::json!({
			"cookbookCode": self.code(),
			"message": self.to_string(),
		});
		if let Self::Validation(v) = self {
			data["violations"] = serde_json::json!(v.violations);
		}
		data
	}
}
