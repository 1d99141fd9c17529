use async_trait::async_trait;
use mockall::automock;

/// Outcome of a CAPTCHA verification call. Consumed immediately, never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationResult {
    Verified,
    Rejected { reason: String },
}

#[automock]
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Checks a client-supplied token with the verification provider. The
    /// caller IP, when known, is forwarded as a risk hint.
    async fn verify(&self, token: &str, remote_ip: Option<String>) -> VerificationResult;
}
