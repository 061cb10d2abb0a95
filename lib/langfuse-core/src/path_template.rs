//! Versioned resource path templates.

use crate::{Error, Result, encode_segment};

/// A resource path with `{name}` placeholders, e.g. `/api/public/v2/prompts/{name}`.
///
/// Static characters of the template are emitted as-is; only the values
/// substituted for placeholders are percent-encoded, one segment each.
///
/// # Example
///
/// ```
/// use langfuse_core::PathTemplate;
///
/// let template = PathTemplate::new("/api/public/v2/prompts/{name}");
/// let path = template.render(&[("name", "test prompt")]).unwrap();
/// assert_eq!(path, "/api/public/v2/prompts/test%20prompt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// Get the template string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Substitute every placeholder with its encoded parameter value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when a placeholder has no matching
    /// parameter or is not closed.
    pub fn render(&self, params: &[(&str, &str)]) -> Result<String> {
        let mut rest = self.0;
        let mut path = String::with_capacity(rest.len());

        while let Some((head, tail)) = rest.split_once('{') {
            path.push_str(head);
            let (key, after) = tail.split_once('}').ok_or_else(|| {
                Error::invalid_request(format!("unclosed placeholder in path template `{}`", self.0))
            })?;
            let value = params
                .iter()
                .find_map(|(name, value)| (*name == key).then_some(*value))
                .ok_or_else(|| {
                    Error::invalid_request(format!(
                        "missing path parameter `{key}` for template `{}`",
                        self.0
                    ))
                })?;
            path.push_str(&encode_segment(value));
            rest = after;
        }
        path.push_str(rest);

        Ok(path)
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_placeholders() {
        let template = PathTemplate::new("/api/public/health");
        assert_eq!(template.render(&[]).expect("render"), "/api/public/health");
    }

    #[test]
    fn render_keeps_static_characters() {
        let template = PathTemplate::new("/api/public/v2/prompts/{name}");
        let path = template.render(&[("name", "test-prompt")]).expect("render");
        assert_eq!(path, "/api/public/v2/prompts/test-prompt");
    }

    #[test]
    fn render_encodes_each_parameter_as_one_segment() {
        let template = PathTemplate::new("/projects/{project}/prompts/{name}");
        let path = template
            .render(&[("name", "a/b"), ("project", "my project")])
            .expect("render");
        assert_eq!(path, "/projects/my%20project/prompts/a%2Fb");
    }

    #[test]
    fn render_does_not_expand_braces_in_values() {
        let template = PathTemplate::new("/prompts/{name}/{other}");
        let path = template
            .render(&[("name", "{other}"), ("other", "x")])
            .expect("render");
        assert_eq!(path, "/prompts/%7Bother%7D/x");
    }

    #[test]
    fn render_missing_parameter() {
        let template = PathTemplate::new("/prompts/{name}");
        let err = template.render(&[("id", "1")]).expect_err("missing");
        assert!(err.to_string().contains("missing path parameter `name`"));
    }

    #[test]
    fn render_unclosed_placeholder() {
        let template = PathTemplate::new("/prompts/{name");
        let err = template.render(&[("name", "x")]).expect_err("unclosed");
        assert!(err.to_string().contains("unclosed placeholder"));
    }

    #[test]
    fn path_template_display() {
        let template = PathTemplate::new("/users/{id}");
        assert_eq!(template.to_string(), "/users/{id}");
        let s: &str = template.as_ref();
        assert_eq!(s, template.as_str());
    }
}
