use std::time::Duration;

use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;

use crate::{constants::START_TIME, AppState};

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now();
    let uptime = now.signed_duration_since(*START_TIME);
    let uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let content_store = if state.contact_handler.is_persisting() {
        "configured"
    } else {
        "not configured (dev mode)"
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime": uptime.to_string(),
        "timestamp": now.to_rfc3339(),
        "content_store": content_store,
    }))
}
