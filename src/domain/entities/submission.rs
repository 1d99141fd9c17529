use serde_json::Value;

use crate::i18n::Lang;

/// Raw, untrusted contact-form fields as received from the client. Built by
/// the normalizer; parsing can degrade fields to empty but never fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Honeypot field. Real visitors never fill it.
    pub website: Option<String>,
    pub lang: Option<String>,
    /// reCAPTCHA proof, when the form is configured to collect one.
    pub token: Option<String>,
}

impl Submission {
    /// Normalizes a raw request body. Malformed or non-object JSON yields an
    /// all-empty submission; non-string values degrade to empty strings and
    /// blank optional fields collapse to `None`.
    pub fn from_json_bytes(raw: &[u8]) -> Self {
        let Ok(value) = serde_json::from_slice::<Value>(raw) else {
            return Self::default();
        };
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        Submission {
            name: string_field(map.get("name")),
            email: string_field(map.get("email")),
            message: string_field(map.get("message")),
            website: optional_field(map.get("website")),
            lang: optional_field(map.get("lang")),
            token: optional_field(map.get("token")),
        }
    }

    pub fn honeypot_tripped(&self) -> bool {
        self.website.is_some()
    }
}

fn string_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn optional_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

/// A submission that passed every validation rule: trimmed, bounds-checked,
/// language collapsed to the supported set. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub lang: Lang,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_yields_empty_submission() {
        assert_eq!(Submission::from_json_bytes(b"not json"), Submission::default());
        assert_eq!(Submission::from_json_bytes(b""), Submission::default());
        assert_eq!(Submission::from_json_bytes(b"[1, 2]"), Submission::default());
        assert_eq!(Submission::from_json_bytes(b"\"hola\""), Submission::default());
    }

    #[test]
    fn non_string_values_degrade_to_empty() {
        let body = br#"{"name": 42, "email": null, "message": {"a": 1}}"#;
        let submission = Submission::from_json_bytes(body);
        assert_eq!(submission.name, "");
        assert_eq!(submission.email, "");
        assert_eq!(submission.message, "");
    }

    #[test]
    fn blank_optional_fields_collapse_to_none() {
        let body = br#"{"website": "   ", "lang": "", "token": 7}"#;
        let submission = Submission::from_json_bytes(body);
        assert_eq!(submission.website, None);
        assert_eq!(submission.lang, None);
        assert_eq!(submission.token, None);
        assert!(!submission.honeypot_tripped());
    }

    #[test]
    fn optional_fields_are_trimmed() {
        let body = br#"{"website": " spam.example ", "lang": " en ", "token": " t "}"#;
        let submission = Submission::from_json_bytes(body);
        assert_eq!(submission.website.as_deref(), Some("spam.example"));
        assert_eq!(submission.lang.as_deref(), Some("en"));
        assert_eq!(submission.token.as_deref(), Some("t"));
        assert!(submission.honeypot_tripped());
    }

    #[test]
    fn required_fields_keep_raw_whitespace() {
        let body = br#"{"name": "  Maria  ", "email": "maria@example.com", "message": "hola"}"#;
        let submission = Submission::from_json_bytes(body);
        assert_eq!(submission.name, "  Maria  ");
    }
}
