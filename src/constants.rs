use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Origin tag attached to every webhook payload.
pub const SOURCE_DOMAIN: &str = "auris.cat";

/// Fixed auth header the n8n webhook expects on every delivery.
pub const WEBHOOK_TOKEN_HEADER: &str = "X-AURIS-TOKEN";
pub const WEBHOOK_TOKEN_VALUE: &str = "required";

pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
pub const RECAPTCHA_SITEVERIFY_ENDPOINT: &str =
    "https://www.google.com/recaptcha/api/siteverify";

/// Action label the contact form embeds in its reCAPTCHA tokens.
pub const RECAPTCHA_EXPECTED_ACTION: &str = "contact_form";
pub const RECAPTCHA_DEFAULT_MIN_SCORE: f64 = 0.5;

pub const RATE_LIMIT_MAX_REQUESTS: u32 = 5;
pub const RATE_LIMIT_WINDOW_MS: u64 = 60_000;

pub const PREFLIGHT_MAX_AGE_SECS: u32 = 86_400;
