//! JSON body decoding.

use crate::Result;

/// MIME type of every body exchanged with the service.
pub const APPLICATION_JSON: &str = "application/json";

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the exact field that failed
/// (e.g. `labels[1]`). The value is either fully built or not at all.
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] if the bytes are not valid
/// JSON or do not match `T`.
///
/// # Example
///
/// ```
/// use langfuse_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Label { name: String }
///
/// let label: Label = from_json(br#"{"name":"production"}"#).expect("deserialize");
/// assert_eq!(label, Label { name: "production".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
