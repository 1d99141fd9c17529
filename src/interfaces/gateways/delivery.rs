use async_trait::async_trait;
use derive_more::Display;
use mockall::automock;

use crate::entities::delivery::{EmailMessage, WebhookPayload};

/// Failure of a single outbound delivery call.
#[derive(Debug, Clone, Display)]
pub enum DeliveryError {
    #[display("Request to {endpoint} failed with status {status}")]
    Rejected { endpoint: String, status: u16 },

    #[display("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
}

impl DeliveryError {
    /// Upstream HTTP status, when the endpoint answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::Rejected { status, .. } => Some(*status),
            DeliveryError::Transport { .. } => None,
        }
    }
}

/// Outbound side of the dispatcher: the webhook channel and the
/// transactional-email provider.
#[automock]
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    async fn post_webhook(&self, url: &str, payload: &WebhookPayload)
        -> Result<(), DeliveryError>;

    async fn send_email(&self, email: &EmailMessage) -> Result<(), DeliveryError>;
}
