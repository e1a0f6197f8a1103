use actix_web::{web, HttpResponse};

use crate::{
    entities::contact::ContactForm,
    errors::AppError,
    use_cases::{contact::SubmissionOutcome, extractors::ClientIp},
    AppState,
};

pub async fn submit_contact(
    state: web::Data<AppState>,
    ip: ClientIp,
    form: web::Json<ContactForm>,
) -> Result<HttpResponse, AppError> {
    // Rate limit before validation: a refused request never reaches the
    // store, and invalid attempts still count against the budget.
    if state.rate_limiter.check_and_record(&ip.0) {
        tracing::warn!(ip = %ip.0, "contact submission rate limited");
        return Err(AppError::RateLimited);
    }

    match state.contact_handler.submit(form.into_inner()).await? {
        SubmissionOutcome::Persisted(_) => {
            Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
        }
        SubmissionOutcome::DevMode => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Your message has been received (dev mode - not persisted)",
        }))),
    }
}

/// Browsers probe with OPTIONS before the cross-origin POST. The CORS
/// headers ride on every response, so the preflight only acknowledges.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}
