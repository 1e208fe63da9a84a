//! HTTP transport types.
//!
//! # Design
//! Requests and responses are described as plain data. `SpigetClient` builds
//! an `HttpRequest` and resolves an `HttpResponse` without touching the
//! network; `SpigetClient::execute` is the only place that does I/O. Keeping
//! the two halves apart lets the request shape be checked in tests without a
//! server.

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL: `base_url` followed by `path`.
    pub url: String,
    /// `/<version>/<endpoint>[?query]`, exactly as sent on the request line.
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data, body fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            url: "http://localhost:80/v1/categories".to_string(),
            path: "/v1/categories".to_string(),
            headers: vec![("user-agent".to_string(), "test/1.0".to_string())],
        };
        assert_eq!(req.header("User-Agent"), Some("test/1.0"));
        assert_eq!(req.header("accept"), None);
    }
}
