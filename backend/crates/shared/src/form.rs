//! Form field errors
//!
//! フォーム送信の検証エラーをフィールド単位で保持します。
//! フォーム全体に対するエラーは [`FORM_FIELD`] (`_form`) に格納されます。
//!
//! JSON 表現:
//! ```json
//! { "error": { "title": ["Title must be at least 3 characters"] } }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

/// Key for errors that belong to the whole form rather than a single field
pub const FORM_FIELD: &str = "_form";

/// Field name -> messages, ordered for stable output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single form-level error
    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(FORM_FIELD, message);
        errors
    }

    /// Single field error
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record the error of a failed validation and keep going
    pub fn check<T, E: ToString>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.add(field, e.to_string());
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// `{"error": {...}}` body returned for a rejected form
#[derive(Debug, Serialize)]
pub struct FormErrorBody<'a> {
    pub error: &'a FieldErrors,
}

/// `{"success": "..."}` body for form actions that do not navigate
#[derive(Debug, Serialize)]
pub struct FormSuccessBody {
    pub success: String,
}

#[cfg(feature = "axum")]
impl FieldErrors {
    /// Render as a form response with the given status
    pub fn into_response_with(self, status: axum::http::StatusCode) -> axum::response::Response {
        use axum::response::IntoResponse;

        (status, axum::Json(FormErrorBody { error: &self })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_messages_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("title", "too short");
        errors.add("title", "contains a link");
        errors.add("content", "required");

        assert_eq!(errors.get("title").map(<[String]>::len), Some(2));
        assert_eq!(errors.get("content"), Some(&["required".to_string()][..]));
        assert!(errors.get("tags").is_none());
    }

    #[test]
    fn test_check_keeps_ok_values() {
        let mut errors = FieldErrors::new();
        let ok: Option<u8> = errors.check("a", Ok::<u8, String>(3));
        let bad: Option<u8> = errors.check("b", Err::<u8, String>("nope".into()));

        assert_eq!(ok, Some(3));
        assert_eq!(bad, None);
        assert_eq!(errors.into_result(), Err(FieldErrors::field("b", "nope")));
    }

    #[test]
    fn test_serializes_under_error_key() {
        let errors = FieldErrors::form("Invalid login credentials");
        let json = serde_json::to_value(FormErrorBody { error: &errors }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "error": { "_form": ["Invalid login credentials"] } })
        );
    }
}
