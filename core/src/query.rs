//! Query-string and path-segment construction.
//!
//! Parameters keep their input order: the first is appended after `?`, every
//! later one after `&`. Nothing is sorted or deduplicated. Keys, values and
//! path segments are percent-encoded so reserved characters in user input
//! (`&`, `?`, `#`, `/`, spaces) cannot change the shape of the request.

use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Text(String),
    Number(i64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(text) => f.write_str(text),
            QueryValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Number(i64::from(value))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Number(value)
    }
}

/// One `key=value` pair of the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    pub value: QueryValue,
}

impl QueryParam {
    pub fn new(key: &str, value: impl Into<QueryValue>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

/// Serialize `params` into `?k1=v1&k2=v2...`, or an empty string when there
/// are none.
pub fn build_query(params: &[QueryParam]) -> String {
    let mut query = String::new();
    for (i, param) in params.iter().enumerate() {
        query.push(if i == 0 { '?' } else { '&' });
        query.push_str(&urlencoding::encode(&param.key));
        query.push('=');
        query.push_str(&urlencoding::encode(&param.value.to_string()));
    }
    query
}

/// Percent-encode a single path segment.
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}
