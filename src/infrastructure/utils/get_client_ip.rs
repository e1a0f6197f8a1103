use actix_web::HttpRequest;

use crate::constants::UNKNOWN_CLIENT;

/// Resolve the client address used to key the rate limiter.
///
/// X-Forwarded-For is client-supplied and spoofable; only honor it
/// (`trust_forwarded`) when a trusted proxy in front of the service
/// overwrites the header. Falls back to the peer address, then to the
/// shared "unknown" sentinel.
pub fn client_ip(req: &HttpRequest, trust_forwarded: bool) -> String {
    if trust_forwarded {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
