//! Prompt resources served by `/api/public/v2/prompts`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{PathTemplate, QueryParams, RequestTarget, Result};

/// Path of a single prompt, addressed by name.
pub const PROMPT_BY_NAME: PathTemplate = PathTemplate::new("/api/public/v2/prompts/{name}");

/// Build the request target for fetching a prompt.
///
/// `version` and `label` become query parameters only when supplied, in that
/// order. Both may be given; the service decides whether the combination is
/// acceptable.
///
/// # Errors
///
/// Never fails for well-formed input; the `Result` carries template errors.
///
/// # Example
///
/// ```
/// use langfuse_core::prompt_target;
///
/// let target = prompt_target("my test prompt", Some(2), None).unwrap();
/// assert_eq!(target.to_string(), "/api/public/v2/prompts/my%20test%20prompt?version=2");
/// ```
pub fn prompt_target(name: &str, version: Option<u32>, label: Option<&str>) -> Result<RequestTarget> {
    let path = PROMPT_BY_NAME.render(&[("name", name)])?;

    let mut query = QueryParams::new();
    query.push_opt("version", version).push_opt("label", label);

    Ok(RequestTarget::new(path, &query))
}

/// Prompt flavour, the `type` field of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// A single text template.
    Text,
    /// A list of chat messages.
    Chat,
}

/// One message of a chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker role, e.g. `system` or `user`.
    pub role: String,
    /// Message template.
    pub content: String,
}

/// Prompt body: plain text or structured chat messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptContent {
    /// Text prompt.
    Text(String),
    /// Chat prompt.
    Chat(Vec<ChatMessage>),
}

impl PromptContent {
    /// The kind matching this content.
    #[must_use]
    pub const fn kind(&self) -> PromptKind {
        match self {
            Self::Text(_) => PromptKind::Text,
            Self::Chat(_) => PromptKind::Chat,
        }
    }

    /// Replace `{{variable}}` placeholders.
    ///
    /// Placeholders without a value are left as they are.
    #[must_use]
    pub fn compile(&self, variables: &HashMap<String, String>) -> Self {
        match self {
            Self::Text(text) => Self::Text(substitute(text, variables)),
            Self::Chat(messages) => Self::Chat(
                messages
                    .iter()
                    .map(|message| ChatMessage {
                        role: message.role.clone(),
                        content: substitute(&message.content, variables),
                    })
                    .collect(),
            ),
        }
    }
}

/// A prompt as returned by the service.
///
/// Only ever built from a complete, consistent payload: `type` must agree
/// with the shape of `prompt`, otherwise deserialization fails as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPrompt")]
pub struct Prompt {
    /// Service-assigned identifier.
    pub id: String,
    /// Prompt name.
    pub name: String,
    /// Version number, starting at 1.
    pub version: u32,
    /// Prompt flavour.
    #[serde(rename = "type")]
    pub kind: PromptKind,
    /// Prompt body.
    pub prompt: PromptContent,
    /// Labels pointing at this version (e.g. `production`).
    pub labels: Vec<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Free-form configuration (model parameters and the like).
    pub config: serde_json::Map<String, serde_json::Value>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Commit message of this version, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
}

impl Prompt {
    /// Returns `true` for a text prompt.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, PromptKind::Text)
    }

    /// Returns `true` for a chat prompt.
    #[must_use]
    pub const fn is_chat(&self) -> bool {
        matches!(self.kind, PromptKind::Chat)
    }

    /// Returns `true` if `label` points at this version.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Compile the prompt body with the given variables.
    #[must_use]
    pub fn compile(&self, variables: &HashMap<String, String>) -> PromptContent {
        self.prompt.compile(variables)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrompt {
    id: String,
    name: String,
    version: u32,
    #[serde(rename = "type")]
    kind: PromptKind,
    prompt: PromptContent,
    labels: Vec<String>,
    tags: Vec<String>,
    config: serde_json::Map<String, serde_json::Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    commit_message: Option<String>,
}

impl TryFrom<RawPrompt> for Prompt {
    type Error = String;

    fn try_from(raw: RawPrompt) -> std::result::Result<Self, Self::Error> {
        if raw.prompt.kind() != raw.kind {
            return Err(format!(
                "prompt `{}` has type {:?} but its content is {:?}",
                raw.name,
                raw.kind,
                raw.prompt.kind()
            ));
        }

        Ok(Self {
            id: raw.id,
            name: raw.name,
            version: raw.version,
            kind: raw.kind,
            prompt: raw.prompt,
            labels: raw.labels,
            tags: raw.tags,
            config: raw.config,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            commit_message: raw.commit_message,
        })
    }
}

fn substitute(template: &str, variables: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let (head, tail) = rest.split_at(start);
        out.push_str(head);

        let Some(end) = tail.find("}}") else {
            rest = tail;
            break;
        };
        let (placeholder, after) = tail.split_at(end + 2);
        let name = placeholder
            .trim_start_matches("{{")
            .trim_end_matches("}}")
            .trim();
        match variables.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(placeholder),
        }
        rest = after;
    }
    out.push_str(rest);

    out
}
