#![allow(dead_code)]

use std::time::Duration;

use auris_contact_api::{
    gateways::{captcha::MockCaptchaVerifier, delivery::MockDeliveryGateway},
    limiter::rate_limiter::RateLimiterStore,
    settings::{DeliveryPolicy, EmailTarget, WebhookTarget},
    use_cases::contact::ContactHandler,
    AppState,
};

pub const WEBHOOK_URL: &str = "https://n8n.auris.cat/webhook/contact";
pub const CLIENT_IP: &str = "203.0.113.7";

pub fn default_limiter() -> RateLimiterStore {
    RateLimiterStore::new(Duration::from_millis(60_000), 5)
}

pub fn disabled_policy() -> DeliveryPolicy {
    DeliveryPolicy {
        webhook: None,
        email: None,
        emergency: None,
        captcha_required: false,
    }
}

pub fn webhook_policy() -> DeliveryPolicy {
    DeliveryPolicy {
        webhook: Some(WebhookTarget {
            url: WEBHOOK_URL.to_string(),
        }),
        ..disabled_policy()
    }
}

pub fn captcha_policy() -> DeliveryPolicy {
    DeliveryPolicy {
        captcha_required: true,
        ..webhook_policy()
    }
}

pub fn email_target() -> EmailTarget {
    EmailTarget {
        from: "Auris Web <no-reply@auris.cat>".to_string(),
        to: vec!["contacto@auris.cat".to_string()],
    }
}

pub fn emergency_target() -> EmailTarget {
    EmailTarget {
        from: "Auris Alertas <alertas@auris.cat>".to_string(),
        to: vec!["urgencias@auris.cat".to_string()],
    }
}

pub fn email_policy(with_emergency: bool) -> DeliveryPolicy {
    DeliveryPolicy {
        webhook: None,
        email: Some(email_target()),
        emergency: with_emergency.then(emergency_target),
        captcha_required: false,
    }
}

/// Gateway that must not be reached at all.
pub fn idle_gateway() -> MockDeliveryGateway {
    let mut gateway = MockDeliveryGateway::new();
    gateway.expect_post_webhook().times(0);
    gateway.expect_send_email().times(0);
    gateway
}

/// Verifier that must not be reached at all.
pub fn idle_verifier() -> MockCaptchaVerifier {
    let mut verifier = MockCaptchaVerifier::new();
    verifier.expect_verify().times(0);
    verifier
}

pub fn contact_handler(
    gateway: MockDeliveryGateway,
    verifier: MockCaptchaVerifier,
    policy: DeliveryPolicy,
) -> ContactHandler<MockDeliveryGateway, MockCaptchaVerifier> {
    ContactHandler::new(gateway, verifier, default_limiter(), policy)
}

pub fn app_state(
    gateway: MockDeliveryGateway,
    verifier: MockCaptchaVerifier,
    policy: DeliveryPolicy,
) -> AppState<MockDeliveryGateway, MockCaptchaVerifier> {
    AppState {
        contact_handler: contact_handler(gateway, verifier, policy),
    }
}

pub fn json_body(fields: &[(&str, &str)]) -> Vec<u8> {
    let mut map = serde_json::Map::new();
    for (key, value) in fields {
        map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
    }
    serde_json::Value::Object(map).to_string().into_bytes()
}

pub fn valid_body() -> Vec<u8> {
    json_body(&[
        ("name", "Maria Puig"),
        ("email", "maria@example.com"),
        ("message", "Me gustaría pedir información sobre las sesiones."),
    ])
}

pub fn honeypot_body() -> Vec<u8> {
    json_body(&[
        ("name", "Bot"),
        ("email", "bot@spam.example"),
        ("message", "spam"),
        ("website", "spam.example"),
    ])
}
