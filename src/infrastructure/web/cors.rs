use actix_web::middleware::DefaultHeaders;

use crate::constants::ALLOWED_CORS_HEADERS;

/// CORS surface carried on every response, error responses and the
/// preflight included.
pub fn cors_headers(allow_origin: &str) -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", allow_origin))
        .add(("Access-Control-Allow-Credentials", "true"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", ALLOWED_CORS_HEADERS))
}
