use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    entities::submission::{Submission, ValidatedSubmission},
    errors::ContactError,
    i18n::Lang,
};

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 200;
const EMAIL_MAX_CHARS: usize = 254;
const MESSAGE_MIN_CHARS: usize = 10;
const MESSAGE_MAX_CHARS: usize = 5000;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Heuristic spam/injection filter: URL schemes, path traversal, Windows
/// drive paths and generic `token/token` path fragments.
static FORBIDDEN_CONTENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(https?://|ftp://|www\.)").unwrap(),
        Regex::new(r"\.{1,2}[\\/]").unwrap(),
        Regex::new(r"(?i)(^|\s)[a-z]:\\").unwrap(),
        Regex::new(r"(^|[\s@])[A-Za-z0-9._-]{2,}[\\/][A-Za-z0-9._-]{2,}").unwrap(),
    ]
});

fn contains_forbidden_content(value: &str) -> bool {
    FORBIDDEN_CONTENT_PATTERNS
        .iter()
        .any(|pattern| pattern.is_match(value))
}

/// Applies the validation rules in fixed order and returns the first
/// violation. Language normalization is independent of the outcome.
pub fn validate(submission: &Submission) -> Result<ValidatedSubmission, ContactError> {
    let name = submission.name.trim();
    let email = submission.email.trim();
    let message = submission.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ContactError::MissingFields);
    }

    let name_chars = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_chars) {
        return Err(ContactError::InvalidName);
    }

    if !EMAIL_PATTERN.is_match(email) || email.chars().count() > EMAIL_MAX_CHARS {
        return Err(ContactError::InvalidEmail);
    }

    let message_chars = message.chars().count();
    if !(MESSAGE_MIN_CHARS..=MESSAGE_MAX_CHARS).contains(&message_chars) {
        return Err(ContactError::InvalidMessage);
    }

    if contains_forbidden_content(name) || contains_forbidden_content(message) {
        return Err(ContactError::ForbiddenContent);
    }

    Ok(ValidatedSubmission {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
        lang: Lang::normalize(submission.lang.as_deref()),
    })
}
