//! Error types for registry API calls

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Access token could not be renewed; the session has been cleared
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// The backend rejected the submission field by field
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("You do not have permission to perform this action")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    /// No response received at all (connection refused, timeout)
    #[error("Server is not responding. Please try again later.")]
    Connect(#[source] reqwest::Error),

    /// Any other non-success status, message taken from the body
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    Store(#[from] crate::store::StoreError),
}

impl ApiError {
    /// Status code of the response that produced this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation(_) => Some(400),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Field-keyed validation messages from a 400 response.
///
/// The backend returns `{"field": ["msg", ...], ...}` for bad submissions;
/// entries are kept in order for display.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    /// Read a validation map out of an error body.
    ///
    /// Returns `None` when the body is not an object or is just a plain
    /// `detail`/`error`/`message` envelope.
    pub fn from_body(body: &serde_json::Value) -> Option<FieldErrors> {
        let map = body.as_object()?;
        if map.is_empty() {
            return None;
        }
        if map.len() == 1 {
            let (key, value) = map.iter().next()?;
            if value.is_string() && matches!(key.as_str(), "detail" | "error" | "message") {
                return None;
            }
        }

        let mut entries = Vec::with_capacity(map.len());
        for (field, messages) in map {
            let texts = match messages {
                serde_json::Value::Array(items) => items.iter().map(text_of).collect(),
                other => vec![text_of(other)],
            };
            entries.push((field.clone(), texts));
        }
        Some(FieldErrors { entries })
    }

    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn text_of(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .entries
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", rendered.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_render_like_the_form() {
        let body = serde_json::json!({
            "registration_number": ["vehicle with this registration number already exists."],
            "year": ["A valid integer is required."]
        });
        let errors = FieldErrors::from_body(&body).unwrap();
        assert_eq!(
            errors.to_string(),
            "registration_number: vehicle with this registration number already exists. | \
             year: A valid integer is required."
        );
    }

    #[test]
    fn test_plain_envelopes_are_not_field_errors() {
        assert!(FieldErrors::from_body(&serde_json::json!({"detail": "oops"})).is_none());
        assert!(FieldErrors::from_body(&serde_json::json!({"error": "oops"})).is_none());
        assert!(FieldErrors::from_body(&serde_json::json!("oops")).is_none());
        assert!(FieldErrors::from_body(&serde_json::json!({})).is_none());
    }

    #[test]
    fn test_non_array_messages_still_render() {
        let errors =
            FieldErrors::from_body(&serde_json::json!({"password": "too short", "detail": "x"}))
                .unwrap();
        let text = errors.to_string();
        assert!(text.contains("password: too short"));
    }
}
