//! Request targets: the path and query portion of a request line.

use url::Url;

use crate::{Error, QueryParams, Result, decode_component};

/// An encoded request target, `path` or `path?query`.
///
/// The query part is present only when at least one parameter was supplied,
/// so a target without parameters never ends in `?`.
///
/// # Example
///
/// ```
/// use langfuse_core::{PathTemplate, QueryParams, RequestTarget};
///
/// let path = PathTemplate::new("/api/public/v2/prompts/{name}")
///     .render(&[("name", "my test prompt")])
///     .unwrap();
/// let mut query = QueryParams::new();
/// query.push("version", 2);
///
/// let target = RequestTarget::new(path, &query);
/// assert_eq!(target.to_string(), "/api/public/v2/prompts/my%20test%20prompt?version=2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestTarget {
    path: String,
    query: Option<String>,
}

impl RequestTarget {
    /// Combine an already-encoded path with a query parameter set.
    #[must_use]
    pub fn new(path: impl Into<String>, query: &QueryParams) -> Self {
        Self {
            path: path.into(),
            query: (!query.is_empty()).then(|| query.encode()),
        }
    }

    /// Encoded path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Encoded query string without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Decoded path segments, without the empty segment before the leading `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment does not decode to UTF-8.
    pub fn segments(&self) -> Result<Vec<String>> {
        self.path
            .strip_prefix('/')
            .unwrap_or(&self.path)
            .split('/')
            .map(|segment| decode_component(segment).map(|s| s.into_owned()))
            .collect()
    }

    /// Decoded query parameters in the order they were encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if a name or value does not decode to UTF-8.
    pub fn query_pairs(&self) -> Result<Vec<(String, String)>> {
        let Some(query) = &self.query else {
            return Ok(Vec::new());
        };
        query
            .split('&')
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                Ok((
                    decode_component(name)?.into_owned(),
                    decode_component(value)?.into_owned(),
                ))
            })
            .collect()
    }

    /// Append this target to a base URL.
    ///
    /// The base URL's own path is kept (with any trailing `/` trimmed) and is
    /// never re-encoded; its query and fragment are dropped.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if the base URL cannot carry a path, or if
    ///   URL normalisation would alter the target (a segment of only `.` or
    ///   `..` cannot be sent unambiguously).
    /// - [`Error::InvalidUrl`] if the joined URL does not parse.
    pub fn resolve(&self, base: &Url) -> Result<Url> {
        if base.cannot_be_a_base() {
            return Err(Error::invalid_request(format!(
                "base URL `{base}` cannot carry a resource path"
            )));
        }

        let mut base = base.clone();
        base.set_query(None);
        base.set_fragment(None);

        let url = Url::parse(&format!("{}{self}", base.as_str().trim_end_matches('/')))?;

        let base_path = base.path().trim_end_matches('/');
        if url.path().strip_prefix(base_path) != Some(self.path.as_str())
            || url.query() != self.query()
        {
            return Err(Error::invalid_request(format!(
                "request target `{self}` is not preserved by URL normalisation"
            )));
        }

        Ok(url)
    }
}

impl std::fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::PathTemplate;

    const PROMPT: PathTemplate = PathTemplate::new("/api/public/v2/prompts/{name}");

    fn target(name: &str, query: &QueryParams) -> RequestTarget {
        RequestTarget::new(PROMPT.render(&[("name", name)]).expect("render"), query)
    }

    #[test]
    fn no_query_means_no_question_mark() {
        let target = target("test prompt", &QueryParams::new());
        check!(target.query().is_none());
        check!(target.to_string() == "/api/public/v2/prompts/test%20prompt");
        check!(!target.to_string().contains('?'));
    }

    #[test]
    fn query_is_appended_once() {
        let mut query = QueryParams::new();
        query.push("label", "my label");
        let target = target("test prompt", &query);
        check!(target.to_string() == "/api/public/v2/prompts/test%20prompt?label=my%20label");
    }

    #[test]
    fn segments_round_trip() {
        let name = "test/prompt&name=value";
        let target = target(name, &QueryParams::new());
        let segments = target.segments().expect("decode");
        check!(segments == ["api", "public", "v2", "prompts", name]);
    }

    #[test]
    fn query_pairs_round_trip() {
        let mut query = QueryParams::new();
        query.push("version", 7).push("label", "a=b&c d");
        let target = target("x", &query);
        let pairs = target.query_pairs().expect("decode");
        check!(
            pairs
                == [
                    ("version".to_string(), "7".to_string()),
                    ("label".to_string(), "a=b&c d".to_string()),
                ]
        );
    }

    #[test]
    fn resolve_against_root_base() {
        let base = Url::parse("https://cloud.langfuse.com").expect("url");
        let url = target("test prompt", &QueryParams::new())
            .resolve(&base)
            .expect("resolve");
        check!(url.as_str() == "https://cloud.langfuse.com/api/public/v2/prompts/test%20prompt");
        check!(url.path() == "/api/public/v2/prompts/test%20prompt");
    }

    #[test]
    fn resolve_keeps_base_path_and_drops_base_query() {
        let base = Url::parse("https://example.com/langfuse/?x=1#frag").expect("url");
        let mut query = QueryParams::new();
        query.push("version", 2);
        let url = target("a/b", &query).resolve(&base).expect("resolve");
        check!(url.as_str() == "https://example.com/langfuse/api/public/v2/prompts/a%2Fb?version=2");
    }

    #[test]
    fn resolve_preserves_encoded_reserved_characters() {
        let base = Url::parse("http://127.0.0.1:8080").expect("url");
        let url = target("test/prompt&name=value", &QueryParams::new())
            .resolve(&base)
            .expect("resolve");
        check!(url.path() == "/api/public/v2/prompts/test%2Fprompt%26name%3Dvalue");
        check!(url.query().is_none());
    }

    #[test]
    fn resolve_rejects_dot_segments() {
        let base = Url::parse("https://cloud.langfuse.com").expect("url");
        let_assert!(Err(Error::InvalidRequest(message)) = target("..", &QueryParams::new()).resolve(&base));
        check!(message.contains("normalisation"));
    }

    #[test]
    fn resolve_rejects_opaque_base() {
        let base = Url::parse("mailto:someone@example.com").expect("url");
        let_assert!(Err(Error::InvalidRequest(_)) = target("x", &QueryParams::new()).resolve(&base));
    }
}
