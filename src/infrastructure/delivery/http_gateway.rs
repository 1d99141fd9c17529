use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{
    constants::{RESEND_ENDPOINT, WEBHOOK_TOKEN_HEADER, WEBHOOK_TOKEN_VALUE},
    entities::delivery::{EmailMessage, WebhookPayload},
    gateways::delivery::{DeliveryError, DeliveryGateway},
};

/// reqwest-backed implementation of both outbound delivery channels. The
/// shared client carries the outbound timeout budget.
#[derive(Clone)]
pub struct HttpDeliveryGateway {
    client: Client,
    resend_api_key: String,
}

impl HttpDeliveryGateway {
    pub fn new(client: Client, resend_api_key: Option<String>) -> Self {
        HttpDeliveryGateway {
            client,
            resend_api_key: resend_api_key.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl DeliveryGateway for HttpDeliveryGateway {
    async fn post_webhook(
        &self,
        url: &str,
        payload: &WebhookPayload,
    ) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(url)
            .header(WEBHOOK_TOKEN_HEADER, WEBHOOK_TOKEN_VALUE)
            .json(payload)
            .send()
            .await
            .map_err(|error| DeliveryError::Transport {
                endpoint: url.to_string(),
                message: error.to_string(),
            })?;

        ensure_success(url, response.status())
    }

    async fn send_email(&self, email: &EmailMessage) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.resend_api_key)
            .json(email)
            .send()
            .await
            .map_err(|error| DeliveryError::Transport {
                endpoint: RESEND_ENDPOINT.to_string(),
                message: error.to_string(),
            })?;

        ensure_success(RESEND_ENDPOINT, response.status())
    }
}

fn ensure_success(endpoint: &str, status: StatusCode) -> Result<(), DeliveryError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(DeliveryError::Rejected {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_2xx_statuses_are_rejections() {
        let error = ensure_success("https://api.resend.com/emails", StatusCode::FORBIDDEN)
            .unwrap_err();
        assert_eq!(error.status(), Some(403));
        assert_eq!(
            error.to_string(),
            "Request to https://api.resend.com/emails failed with status 403"
        );
    }

    #[test]
    fn success_statuses_pass_through() {
        assert!(ensure_success("https://example.com", StatusCode::OK).is_ok());
        assert!(ensure_success("https://example.com", StatusCode::ACCEPTED).is_ok());
    }
}
