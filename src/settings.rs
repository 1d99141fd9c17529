use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::{env, fmt, str::FromStr, time::Duration};
use url::Url;

use crate::constants::RECAPTCHA_DEFAULT_MIN_SCORE;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// n8n webhook receiving every submission. Channel disabled when unset.
    #[serde(default)]
    pub webhook_url: Option<String>,

    #[serde(default)]
    pub resend_api_key: Option<String>,

    #[serde(default)]
    pub from_email: Option<String>,

    /// Comma-separated primary recipients.
    #[serde(default)]
    pub to_emails: Option<String>,

    #[serde(default)]
    pub emergency_from_email: Option<String>,

    /// Comma-separated recipients for the fallback alert path.
    #[serde(default)]
    pub emergency_to_emails: Option<String>,

    #[serde(default)]
    pub recaptcha_secret_key: Option<String>,

    #[serde(default)]
    pub recaptcha_site_key: Option<String>,

    /// Kept as a raw string: an unparsable value falls back to the default
    /// score instead of failing startup.
    #[serde(default)]
    pub recaptcha_min_score: Option<String>,

    #[serde(default = "default_outbound_timeout_secs")]
    pub outbound_timeout_secs: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Auris-Contact-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_outbound_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(Environment::with_prefix("APP").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production".to_string());
        }

        if let Some(raw) = non_empty(self.webhook_url.as_deref()) {
            match Url::parse(raw) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => errors.push("WEBHOOK_URL must be a valid http(s) URL".to_string()),
            }
        }

        let email_parts = [
            non_empty(self.resend_api_key.as_deref()).is_some(),
            non_empty(self.from_email.as_deref()).is_some(),
            !self.email_recipients().is_empty(),
        ];
        if email_parts.iter().any(|p| *p) && !email_parts.iter().all(|p| *p) {
            errors.push(
                "Email channel needs RESEND_API_KEY, FROM_EMAIL and TO_EMAILS together"
                    .to_string(),
            );
        }

        let emergency_parts = [
            non_empty(self.emergency_from_email.as_deref()).is_some(),
            !self.emergency_recipients().is_empty(),
        ];
        if emergency_parts.iter().any(|p| *p) && !emergency_parts.iter().all(|p| *p) {
            errors.push(
                "Emergency route needs EMERGENCY_FROM_EMAIL and EMERGENCY_TO_EMAILS together"
                    .to_string(),
            );
        }

        let captcha_parts = [
            non_empty(self.recaptcha_secret_key.as_deref()).is_some(),
            non_empty(self.recaptcha_site_key.as_deref()).is_some(),
        ];
        if captcha_parts.iter().any(|p| *p) && !captcha_parts.iter().all(|p| *p) {
            errors.push(
                "reCAPTCHA needs RECAPTCHA_SECRET_KEY and RECAPTCHA_SITE_KEY together"
                    .to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn email_recipients(&self) -> Vec<String> {
        split_list(self.to_emails.as_deref())
    }

    pub fn emergency_recipients(&self) -> Vec<String> {
        split_list(self.emergency_to_emails.as_deref())
    }

    pub fn captcha_min_score(&self) -> f64 {
        self.recaptcha_min_score
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|score| score.is_finite())
            .unwrap_or(RECAPTCHA_DEFAULT_MIN_SCORE)
    }

    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_secs(self.outbound_timeout_secs)
    }

    /// Snapshot of which delivery channels are live, computed once at startup.
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        let webhook = non_empty(self.webhook_url.as_deref()).map(|url| WebhookTarget {
            url: url.to_string(),
        });

        let email = match (
            non_empty(self.resend_api_key.as_deref()),
            non_empty(self.from_email.as_deref()),
            self.email_recipients(),
        ) {
            (Some(_), Some(from), to) if !to.is_empty() => Some(EmailTarget {
                from: from.to_string(),
                to,
            }),
            _ => None,
        };

        let emergency = match (
            non_empty(self.emergency_from_email.as_deref()),
            self.emergency_recipients(),
        ) {
            (Some(from), to) if !to.is_empty() => Some(EmailTarget {
                from: from.to_string(),
                to,
            }),
            _ => None,
        };

        let captcha_required = non_empty(self.recaptcha_secret_key.as_deref()).is_some()
            && non_empty(self.recaptcha_site_key.as_deref()).is_some();

        DeliveryPolicy {
            webhook,
            email,
            emergency,
            captcha_required,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Configured webhook endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookTarget {
    pub url: String,
}

/// Configured sender/recipients for one email route.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailTarget {
    pub from: String,
    pub to: Vec<String>,
}

/// Which delivery channels a submission fans out to. Derived from config
/// presence; never mutated after startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPolicy {
    pub webhook: Option<WebhookTarget>,
    pub email: Option<EmailTarget>,
    pub emergency: Option<EmailTarget>,
    pub captcha_required: bool,
}

impl DeliveryPolicy {
    pub fn any_channel_enabled(&self) -> bool {
        self.webhook.is_some() || self.email.is_some()
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self.as_deref().map(str::trim) {
            None | Some("") => "[NOT SET]",
            Some(_) => "[REDACTED]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("webhook_url", &self.webhook_url.redact())
            .field("resend_api_key", &self.resend_api_key.redact())
            .field("from_email", &self.from_email)
            .field("to_emails", &self.to_emails)
            .field("emergency_from_email", &self.emergency_from_email)
            .field("emergency_to_emails", &self.emergency_to_emails)
            .field("recaptcha_secret_key", &self.recaptcha_secret_key.redact())
            .field("recaptcha_site_key", &self.recaptcha_site_key)
            .field("recaptcha_min_score", &self.recaptcha_min_score)
            .field("outbound_timeout_secs", &self.outbound_timeout_secs)
            .finish()
    }
}
