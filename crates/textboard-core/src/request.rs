//! Command-line request parsing
//!
//! One line typed at the prompt looks like a tiny URL:
//! `article/modify?id=3&title=Hello`. The part before the first `?` is the
//! path used for routing; the rest is split on `&` and then on the first `=`.
//! No percent-decoding is performed.

use std::collections::BTreeMap;

use crate::errors::BoardError;

/// A parsed input line: routable path plus flat string parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    raw: String,
    path: String,
    parameters: BTreeMap<String, String>,
}

impl CommandRequest {
    /// Parse one input line. Never fails; malformed query strings degrade to
    /// partial or empty parameter maps.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw.as_str(), ""),
        };

        let parameters = parse_query(query);
        let path = path.to_string();

        Self {
            raw,
            path,
            parameters,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a parameter; `Some("")` when the key was given without `=`
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// All parameters, ordered by key
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameters
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Read a parameter as an integer; absent parameters are `Ok(None)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the value is present but not an integer.
    pub fn parameter_as_i64(&self, name: &str) -> Result<Option<i64>, BoardError> {
        match self.parameter(name) {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|e| BoardError::InvalidParameter {
                    name: name.to_string(),
                    value: value.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    /// Read a mandatory integer parameter
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` when absent and `InvalidParameter` when not an integer.
    pub fn required_i64(&self, name: &str) -> Result<i64, BoardError> {
        self.parameter_as_i64(name)?
            .ok_or_else(|| BoardError::MissingParameter {
                name: name.to_string(),
            })
    }
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    let mut parameters = BTreeMap::new();

    for piece in query.split('&').filter(|piece| !piece.is_empty()) {
        let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
        // Later pairs overwrite earlier ones
        parameters.insert(key.to_string(), value.to_string());
    }

    parameters
}
