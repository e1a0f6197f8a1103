use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Request headers a browser may send on the cross-origin POST.
pub const ALLOWED_CORS_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, \
     Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";

/// Rate-limit key used when no client address can be determined. All such
/// clients share a single bucket.
pub const UNKNOWN_CLIENT: &str = "unknown";
