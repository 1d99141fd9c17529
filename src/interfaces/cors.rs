use actix_web::{http::header, HttpRequest};

/// Resolved-origin policy: the `Origin` header is echoed back only when it is
/// the request's own origin, appears in the configured allow-list, or the
/// allow-list carries a wildcard. Anything else gets no CORS headers.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        CorsPolicy { allowed_origins }
    }

    pub fn resolve(&self, req: &HttpRequest) -> Option<String> {
        let origin = req.headers().get(header::ORIGIN)?.to_str().ok()?;

        let info = req.connection_info();
        let own_origin = format!("{}://{}", info.scheme(), info.host());

        let allowed = origin == own_origin
            || self
                .allowed_origins
                .iter()
                .any(|candidate| candidate == "*" || candidate == origin);

        allowed.then(|| origin.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn request(origin: &str, host: &str) -> HttpRequest {
        TestRequest::default()
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::HOST, host))
            .to_http_request()
    }

    #[test]
    fn own_origin_is_echoed_without_allow_list() {
        let policy = CorsPolicy::new(vec![]);
        let req = request("http://auris.cat", "auris.cat");
        assert_eq!(policy.resolve(&req).as_deref(), Some("http://auris.cat"));
    }

    #[test]
    fn listed_origin_is_echoed() {
        let policy = CorsPolicy::new(vec!["https://auris.cat".to_string()]);
        let req = request("https://auris.cat", "api.auris.cat");
        assert_eq!(policy.resolve(&req).as_deref(), Some("https://auris.cat"));
    }

    #[test]
    fn wildcard_echoes_any_origin() {
        let policy = CorsPolicy::new(vec!["*".to_string()]);
        let req = request("https://anything.example", "api.auris.cat");
        assert_eq!(
            policy.resolve(&req).as_deref(),
            Some("https://anything.example")
        );
    }

    #[test]
    fn unlisted_cross_origin_gets_nothing() {
        let policy = CorsPolicy::new(vec!["https://auris.cat".to_string()]);
        let req = request("https://evil.example", "api.auris.cat");
        assert_eq!(policy.resolve(&req), None);
    }

    #[test]
    fn absent_origin_header_gets_nothing() {
        let policy = CorsPolicy::new(vec!["*".to_string()]);
        let req = TestRequest::default().to_http_request();
        assert_eq!(policy.resolve(&req), None);
    }
}
