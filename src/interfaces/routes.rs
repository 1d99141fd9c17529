use actix_web::{http::Method, web};

use crate::{
    gateways::{captcha::CaptchaVerifier, delivery::DeliveryGateway},
    handlers::{contact, home::home, system},
};

pub fn configure_routes<G, V>(cfg: &mut web::ServiceConfig)
where
    G: DeliveryGateway + 'static,
    V: CaptchaVerifier + 'static,
{
    cfg.service(home);

    cfg.route("/health", web::get().to(system::health_check::<G, V>));

    cfg.service(
        web::resource("/api/contact")
            .route(web::post().to(contact::submit_contact::<G, V>))
            .route(
                web::route()
                    .method(Method::OPTIONS)
                    .to(contact::contact_preflight),
            ),
    );
}
