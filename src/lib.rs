mod domain;
mod interfaces;
mod infrastructure;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{captcha, delivery, limiter, utils};
pub use interfaces::{cors, gateways, handlers, routes};

use std::time::Duration;

use anyhow::Context;

use captcha::recaptcha::RecaptchaVerifier;
use constants::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_MS};
use delivery::http_gateway::HttpDeliveryGateway;
use gateways::{captcha::CaptchaVerifier, delivery::DeliveryGateway};
use limiter::rate_limiter::RateLimiterStore;
use settings::AppConfig;
use use_cases::contact::ContactHandler;

pub struct AppState<G, V>
where
    G: DeliveryGateway,
    V: CaptchaVerifier,
{
    pub contact_handler: ContactHandler<G, V>,
}

/// The state the binary runs with; tests swap in mocked gateways.
pub type ProdAppState = AppState<HttpDeliveryGateway, RecaptchaVerifier>;

impl ProdAppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.outbound_timeout())
            .build()
            .context("Failed to build outbound HTTP client")?;

        let gateway = HttpDeliveryGateway::new(client.clone(), config.resend_api_key.clone());
        let verifier = RecaptchaVerifier::new(
            client,
            config.recaptcha_secret_key.clone(),
            config.captcha_min_score(),
        );
        let limiter = RateLimiterStore::new(
            Duration::from_millis(RATE_LIMIT_WINDOW_MS),
            RATE_LIMIT_MAX_REQUESTS,
        );

        Ok(AppState {
            contact_handler: ContactHandler::new(
                gateway,
                verifier,
                limiter,
                config.delivery_policy(),
            ),
        })
    }
}
