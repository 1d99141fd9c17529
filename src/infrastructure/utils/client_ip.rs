use actix_web::HttpRequest;

/// Forwarding headers consulted in priority order; the first populated one
/// wins, taking its first comma-separated element.
const FORWARDING_HEADERS: [&str; 6] = [
    "x-client-ip",
    "cf-connecting-ip",
    "fastly-client-ip",
    "true-client-ip",
    "x-real-ip",
    "x-forwarded-for",
];

/// Resolves the client key used for rate limiting and as a CAPTCHA risk hint.
/// Falls back to the socket peer address; `None` when nothing is resolvable.
pub fn client_ip(req: &HttpRequest) -> Option<String> {
    for header in FORWARDING_HEADERS {
        let Some(value) = req.headers().get(header) else {
            continue;
        };
        let Ok(raw) = value.to_str() else {
            continue;
        };
        let first = raw.split(',').next().unwrap_or_default().trim();
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}
