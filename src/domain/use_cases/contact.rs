use crate::{
    entities::{
        delivery::{EmailMessage, WebhookPayload},
        submission::{Submission, ValidatedSubmission},
    },
    errors::ContactError,
    gateways::{
        captcha::{CaptchaVerifier, VerificationResult},
        delivery::{DeliveryError, DeliveryGateway},
    },
    i18n::messages,
    limiter::rate_limiter::{RateLimitDecision, RateLimiterStore},
    settings::DeliveryPolicy,
    use_cases::validation::validate,
};

/// Final state of an accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Honeypot tripped; the caller sees a normal success response while the
    /// submission is dropped.
    Absorbed,
    /// Submission delivered to every configured channel.
    Delivered,
}

/// Drives a submission through the full pipeline: rate limit, honeypot,
/// validation, channel availability, CAPTCHA, dispatch. Each stage
/// short-circuits on failure.
pub struct ContactHandler<G, V>
where
    G: DeliveryGateway,
    V: CaptchaVerifier,
{
    gateway: G,
    verifier: V,
    limiter: RateLimiterStore,
    policy: DeliveryPolicy,
}

impl<G, V> ContactHandler<G, V>
where
    G: DeliveryGateway,
    V: CaptchaVerifier,
{
    pub fn new(gateway: G, verifier: V, limiter: RateLimiterStore, policy: DeliveryPolicy) -> Self {
        ContactHandler {
            gateway,
            verifier,
            limiter,
            policy,
        }
    }

    pub fn policy(&self) -> &DeliveryPolicy {
        &self.policy
    }

    /// Rate limiting runs first so abusive traffic is shed before any other
    /// work; a request with no resolvable client key skips the limiter.
    pub async fn handle(
        &self,
        raw_body: &[u8],
        client_key: Option<&str>,
    ) -> Result<SubmissionOutcome, ContactError> {
        let submission = Submission::from_json_bytes(raw_body);

        if let Some(key) = client_key {
            if self.limiter.check(key) == RateLimitDecision::Limited {
                tracing::warn!(client = %key, "rate limit exceeded");
                return Err(ContactError::RateLimited);
            }
        }

        if submission.honeypot_tripped() {
            tracing::info!("honeypot field set, absorbing submission");
            return Ok(SubmissionOutcome::Absorbed);
        }

        let validated = validate(&submission)?;

        if !self.policy.any_channel_enabled() {
            tracing::error!("submission received but no delivery channel is configured");
            return Err(ContactError::FormDisabled {
                message: messages(validated.lang).form_disabled.to_string(),
            });
        }

        if self.policy.captcha_required {
            let token = submission
                .token
                .as_deref()
                .ok_or(ContactError::CaptchaRequired)?;

            if let VerificationResult::Rejected { reason } =
                self.verifier.verify(token, client_key.map(str::to_string)).await
            {
                tracing::warn!(%reason, "captcha verification rejected");
                return Err(ContactError::CaptchaRejected);
            }
        }

        self.dispatch(&validated).await?;
        Ok(SubmissionOutcome::Delivered)
    }

    async fn dispatch(&self, submission: &ValidatedSubmission) -> Result<(), ContactError> {
        if let Some(webhook) = &self.policy.webhook {
            let payload = WebhookPayload::new(submission);
            self.gateway
                .post_webhook(&webhook.url, &payload)
                .await
                .map_err(|error| {
                    tracing::error!(%error, "webhook delivery failed");
                    ContactError::DeliveryFailed(error.to_string())
                })?;
        }

        if let Some(email) = &self.policy.email {
            let notification = EmailMessage::contact_notification(email, submission);
            if let Err(error) = self.gateway.send_email(&notification).await {
                // A 403 means the provider blocked the sender (e.g. domain
                // restriction); reroute the alert and degrade to 503.
                if error.status() == Some(403) {
                    tracing::error!(%error, "primary email provider rejected the send");
                    self.raise_emergency(submission, &error).await;
                    return Err(ContactError::ServiceUnavailable {
                        message: messages(submission.lang).service_unavailable.to_string(),
                    });
                }

                tracing::error!(%error, "email delivery failed");
                return Err(ContactError::DeliveryFailed(error.to_string()));
            }
        }

        Ok(())
    }

    /// Best-effort one-shot alternate route; its own failures are logged and
    /// never surfaced to the caller.
    async fn raise_emergency(&self, submission: &ValidatedSubmission, cause: &DeliveryError) {
        let Some(target) = &self.policy.emergency else {
            tracing::error!("primary email rejected and no emergency route is configured");
            return;
        };

        let alert = EmailMessage::emergency_notification(target, submission, &cause.to_string());
        match self.gateway.send_email(&alert).await {
            Ok(()) => tracing::info!("emergency notification dispatched"),
            Err(error) => tracing::error!(%error, "emergency notification failed"),
        }
    }
}
