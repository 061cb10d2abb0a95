//! Percent-encoding for caller-supplied request components.
//!
//! Every dynamic value that ends up in a request target (a path segment, a
//! query parameter name or value) goes through [`encode_segment`] or
//! [`encode_component`]. Both apply the same rule: anything outside the
//! unreserved set `A-Z a-z 0-9 - _ . ~` is percent-encoded, including space
//! (`%20`, never `+`), `/`, `?`, `&`, `=` and every non-ASCII octet.
//!
//! # Example
//!
//! ```
//! use langfuse_core::{QueryParams, encode_segment};
//!
//! assert_eq!(encode_segment("test/prompt&name=value"), "test%2Fprompt%26name%3Dvalue");
//!
//! let mut query = QueryParams::new();
//! query.push("label", "my label");
//! query.push_opt("version", None::<u32>);
//! assert_eq!(query.encode(), "label=my%20label");
//! ```

use std::borrow::Cow;
use std::fmt::Display;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::{Error, Result};

/// Encode set that leaves only the RFC 3986 unreserved characters untouched.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single path segment.
///
/// The result never contains `/`, so a value always stays one segment.
#[must_use]
pub fn encode_segment(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).into()
}

/// Percent-encode a query parameter name or value.
#[must_use]
pub fn encode_component(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).into()
}

/// Decode a percent-encoded component back into its original string.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if the decoded octets are not valid UTF-8.
pub fn decode_component(encoded: &str) -> Result<Cow<'_, str>> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map_err(|e| Error::invalid_request(format!("invalid percent-encoded UTF-8: {e}")))
}

/// Ordered set of query parameters.
///
/// Only parameters that were actually supplied are stored; [`QueryParams::push_opt`]
/// drops `None` so that unset parameters never show up, not even as `name=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Display) -> &mut Self {
        self.pairs.push((name.into(), value.to_string()));
        self
    }

    /// Appends a parameter if a value is present.
    pub fn push_opt<V: Display>(&mut self, name: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(name, value);
        }
        self
    }

    /// Returns `true` if no parameter was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders `name=value` pairs joined with `&`, both sides percent-encoded.
    ///
    /// Returns an empty string for an empty set.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(&encode_component(name));
            out.push('=');
            out.push_str(&encode_component(value));
        }
        out
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.push(name, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_characters_pass_through() {
        let value = "AZaz09-_.~";
        assert_eq!(encode_segment(value), value);
        assert!(matches!(encode_segment(value), Cow::Borrowed(_)));
    }

    #[test]
    fn space_is_percent_20() {
        assert_eq!(encode_segment("my test prompt"), "my%20test%20prompt");
        assert_eq!(encode_component("my label"), "my%20label");
    }

    #[test]
    fn reserved_characters_are_encoded() {
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_segment("??"), "%3F%3F");
        assert_eq!(encode_segment("100%"), "100%25");
        assert_eq!(encode_segment("a+b"), "a%2Bb");
        assert_eq!(encode_segment("#{x}"), "%23%7Bx%7D");
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        assert_eq!(encode_segment("café"), "caf%C3%A9");
        assert_eq!(encode_segment("提示"), "%E6%8F%90%E7%A4%BA");
    }

    #[test]
    fn empty_value_encodes_to_empty() {
        assert_eq!(encode_segment(""), "");
    }

    #[test]
    fn decode_reverses_encode() {
        for value in ["test prompt", "test/prompt&name=value", "??", "café", "", "a%b"] {
            let encoded = encode_segment(value);
            let decoded = decode_component(&encoded).expect("valid utf-8");
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = decode_component("%FF%FE").expect_err("not utf-8");
        assert!(err.to_string().contains("invalid percent-encoded UTF-8"));
    }

    #[test]
    fn query_params_skip_none() {
        let mut query = QueryParams::new();
        query.push_opt("version", None::<u32>);
        query.push_opt("label", None::<&str>);
        assert!(query.is_empty());
        assert_eq!(query.encode(), "");
    }

    #[test]
    fn query_params_keep_insertion_order() {
        let mut query = QueryParams::new();
        query.push("version", 3).push("label", "prod & staging");
        assert_eq!(query.len(), 2);
        assert_eq!(query.encode(), "version=3&label=prod%20%26%20staging");
    }

    #[test]
    fn query_names_are_encoded() {
        let query: QueryParams = [("a b", "c=d")].into_iter().collect();
        assert_eq!(query.encode(), "a%20b=c%3Dd");
    }
}
