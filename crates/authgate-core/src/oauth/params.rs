//! Request parameter sources.
//!
//! The authorization endpoint accepts its parameters either in the query
//! string (GET) or in an `application/x-www-form-urlencoded` body (POST).
//! Both are exposed through [`ParameterSource`] so the handler never needs to
//! know which transport carried the request.

use std::collections::HashMap;

/// Get-by-key access to raw, percent-decoded request parameters.
pub trait ParameterSource: Send + Sync {
    /// Returns the value of `key`, or `None` if the parameter was not sent.
    ///
    /// When a key is repeated, the last occurrence wins.
    fn get(&self, key: &str) -> Option<&str>;
}

fn decode_pairs(input: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(input)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

// =============================================================================
// Query String
// =============================================================================

/// Parameters taken from a URL query string.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// Decodes a raw query string (without the leading `?`).
    ///
    /// A missing query string yields an empty source.
    #[must_use]
    pub fn from_query(query: Option<&str>) -> Self {
        Self {
            values: query.map(|q| decode_pairs(q.as_bytes())).unwrap_or_default(),
        }
    }
}

impl ParameterSource for QueryParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

// =============================================================================
// Form Body
// =============================================================================

/// Parameters taken from an `application/x-www-form-urlencoded` request body.
#[derive(Debug, Clone, Default)]
pub struct FormParams {
    values: HashMap<String, String>,
}

impl FormParams {
    /// Decodes a form-encoded body.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        Self {
            values: decode_pairs(body),
        }
    }
}

impl ParameterSource for FormParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl ParameterSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}
