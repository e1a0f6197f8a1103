use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{utils::get_client_ip::client_ip, AppState};

/// Extractor for the address keying the rate limiter.
/// Usage: add `ip: ClientIp` as a parameter to your handler function.
#[derive(Debug)]
pub struct ClientIp(pub String);

impl FromRequest for ClientIp {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let trust_forwarded = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.trust_forwarded_for)
            .unwrap_or(false);

        ready(Ok(ClientIp(client_ip(req, trust_forwarded))))
    }
}
