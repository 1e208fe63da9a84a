//! Result of a catalog request.
//!
//! The client does not model the catalog's entities. A body that parses as
//! JSON comes back as a `serde_json::Value`; anything else (an HTML error
//! page, an empty body, truncated JSON) comes back verbatim as text.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    Json(Value),
    Text(String),
}

impl ApiResult {
    /// Parse `body` as JSON, falling back to the untouched text.
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => ApiResult::Json(value),
            Err(_) => ApiResult::Text(body),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, ApiResult::Json(_))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResult::Json(value) => Some(value),
            ApiResult::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiResult::Json(_) => None,
            ApiResult::Text(text) => Some(text),
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ApiResult::Json(value) => Some(value),
            ApiResult::Text(_) => None,
        }
    }
}
