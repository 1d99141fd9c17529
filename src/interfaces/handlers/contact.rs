use actix_web::{http::header, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use serde_json::json;

use crate::{
    constants::PREFLIGHT_MAX_AGE_SECS,
    cors::CorsPolicy,
    gateways::{captcha::CaptchaVerifier, delivery::DeliveryGateway},
    utils::client_ip::client_ip,
    AppState,
};

/// Shapes every contact response: JSON body plus CORS headers when the origin
/// resolved.
fn json_response(
    status: StatusCode,
    body: serde_json::Value,
    cors_origin: Option<&str>,
) -> HttpResponse {
    let mut builder = HttpResponse::build(status);
    if let Some(origin) = cors_origin {
        builder.insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin));
        builder.insert_header((header::VARY, "Origin"));
    }
    builder.json(body)
}

pub async fn submit_contact<G, V>(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState<G, V>>,
    cors: web::Data<CorsPolicy>,
) -> HttpResponse
where
    G: DeliveryGateway + 'static,
    V: CaptchaVerifier + 'static,
{
    let cors_origin = cors.resolve(&req);
    let client_key = client_ip(&req);

    match state
        .contact_handler
        .handle(&body, client_key.as_deref())
        .await
    {
        Ok(_) => json_response(StatusCode::OK, json!({ "ok": true }), cors_origin.as_deref()),
        Err(error) => json_response(
            error.status_code(),
            json!({ "error": error.to_string() }),
            cors_origin.as_deref(),
        ),
    }
}

/// CORS preflight for the contact endpoint.
pub async fn contact_preflight(req: HttpRequest, cors: web::Data<CorsPolicy>) -> HttpResponse {
    let requested_headers = req
        .headers()
        .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("Content-Type")
        .to_string();

    let mut builder = HttpResponse::NoContent();
    builder.insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"));
    builder.insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, requested_headers));
    builder.insert_header((
        header::ACCESS_CONTROL_MAX_AGE,
        PREFLIGHT_MAX_AGE_SECS.to_string(),
    ));

    if let Some(origin) = cors.resolve(&req) {
        builder.insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin));
        builder.insert_header((header::VARY, "Origin"));
    }

    builder.finish()
}
