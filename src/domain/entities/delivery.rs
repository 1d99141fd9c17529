use chrono::Utc;
use serde::Serialize;

use crate::{
    constants::SOURCE_DOMAIN,
    entities::submission::ValidatedSubmission,
    i18n::Lang,
    settings::EmailTarget,
    utils::html::escape_html,
};

/// Body POSTed to the configured n8n webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    pub lang: Lang,
    pub source: &'static str,
}

impl WebhookPayload {
    pub fn new(submission: &ValidatedSubmission) -> Self {
        WebhookPayload {
            name: submission.name.clone(),
            email: submission.email.clone(),
            message: submission.message.clone(),
            lang: submission.lang,
            source: SOURCE_DOMAIN,
        }
    }
}

/// Request body for the Resend send endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    /// Notification for a fresh submission, sent over the primary route.
    pub fn contact_notification(target: &EmailTarget, submission: &ValidatedSubmission) -> Self {
        EmailMessage {
            from: target.from.clone(),
            to: target.to.clone(),
            subject: format!("Nuevo contacto — {} ({})", SOURCE_DOMAIN, submission.lang),
            html: submission_html(submission),
        }
    }

    /// Alert raised when the primary route rejects the send. Carries the
    /// original submission, the triggering error and a generation timestamp.
    pub fn emergency_notification(
        target: &EmailTarget,
        submission: &ValidatedSubmission,
        cause: &str,
    ) -> Self {
        EmailMessage {
            from: target.from.clone(),
            to: target.to.clone(),
            subject: format!("Fallo de entrega — {} ({})", SOURCE_DOMAIN, submission.lang),
            html: format!(
                "<p><b>Entrega principal rechazada:</b> {}</p>\n<p><b>Generado:</b> {}</p>\n{}",
                escape_html(cause),
                Utc::now().to_rfc3339(),
                submission_html(submission),
            ),
        }
    }
}

/// User-supplied fields are escaped before interpolation; message newlines
/// become line breaks.
fn submission_html(submission: &ValidatedSubmission) -> String {
    format!(
        "<p><b>Nombre:</b> {}</p>\n<p><b>Email:</b> {}</p>\n<p><b>Mensaje:</b><br>{}</p>",
        escape_html(&submission.name),
        escape_html(&submission.email),
        escape_html(&submission.message).replace('\n', "<br>"),
    )
}
