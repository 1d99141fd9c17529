use std::time::Duration;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use humantime::format_duration;

use crate::{
    constants::START_TIME,
    gateways::{captcha::CaptchaVerifier, delivery::DeliveryGateway},
    AppState,
};

/// Liveness probe. Also reports which delivery channels this instance was
/// configured with, so a misdeployed environment is visible at a glance.
pub async fn health_check<G, V>(state: web::Data<AppState<G, V>>) -> HttpResponse
where
    G: DeliveryGateway + 'static,
    V: CaptchaVerifier + 'static,
{
    let now = Utc::now();
    let uptime_secs = now.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;
    let policy = state.contact_handler.policy();

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "uptime": format_duration(Duration::from_secs(uptime_secs)).to_string(),
        "timestamp": now.to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "channels": {
            "webhook": policy.webhook.is_some(),
            "email": policy.email.is_some(),
            "emergency": policy.emergency.is_some(),
            "captcha": policy.captcha_required,
        }
    }))
}
