use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    constants::{RECAPTCHA_EXPECTED_ACTION, RECAPTCHA_SITEVERIFY_ENDPOINT},
    gateways::captcha::{CaptchaVerifier, VerificationResult},
};

/// Shape of the siteverify response body.
#[derive(Debug, Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default, rename = "error-codes")]
    error_codes: Option<Vec<String>>,
}

/// reCAPTCHA verifier. Every failure mode, including transport errors, maps
/// to a rejection with a reason that stays server-side.
#[derive(Clone)]
pub struct RecaptchaVerifier {
    client: Client,
    secret: String,
    min_score: f64,
}

impl RecaptchaVerifier {
    pub fn new(client: Client, secret: Option<String>, min_score: f64) -> Self {
        RecaptchaVerifier {
            client,
            secret: secret.unwrap_or_default(),
            min_score,
        }
    }

    fn evaluate(&self, response: SiteverifyResponse) -> VerificationResult {
        if !response.success {
            let codes = response
                .error_codes
                .map(|codes| codes.join(", "))
                .unwrap_or_else(|| "unknown-error".to_string());
            return VerificationResult::Rejected {
                reason: format!("reCAPTCHA not validated ({codes})"),
            };
        }

        if let Some(score) = response.score {
            if score < self.min_score {
                return VerificationResult::Rejected {
                    reason: format!("reCAPTCHA score too low ({score})"),
                };
            }
        }

        if let Some(action) = &response.action {
            if action != RECAPTCHA_EXPECTED_ACTION {
                return VerificationResult::Rejected {
                    reason: format!("unexpected reCAPTCHA action ({action})"),
                };
            }
        }

        VerificationResult::Verified
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str, remote_ip: Option<String>) -> VerificationResult {
        let mut params = vec![("secret", self.secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip.as_deref() {
            params.push(("remoteip", ip));
        }

        let response = match self
            .client
            .post(RECAPTCHA_SITEVERIFY_ENDPOINT)
            .form(&params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                return VerificationResult::Rejected {
                    reason: format!("siteverify request failed: {error}"),
                };
            }
        };

        if !response.status().is_success() {
            return VerificationResult::Rejected {
                reason: format!("siteverify returned status {}", response.status()),
            };
        }

        match response.json::<SiteverifyResponse>().await {
            Ok(body) => self.evaluate(body),
            Err(error) => VerificationResult::Rejected {
                reason: format!("siteverify body unreadable: {error}"),
            },
        }
    }
}
