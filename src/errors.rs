use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

/// What a client is told when the pipeline fails on our side. Internal
/// detail stays in the server log.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while processing your request.";

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Display)]
pub enum AppError {
    #[display("Validation failed")]
    Validation(Vec<FieldError>),

    #[display("Method not allowed")]
    MethodNotAllowed,

    #[display("Rate limit exceeded")]
    RateLimited,

    #[display("Invalid request body")]
    InvalidBody,

    #[display("Content store error: {_0}")]
    ContentStore(String),

    #[display("Internal server error: {_0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => serde_json::json!({
                "success": false,
                "errors": errors,
            }),
            AppError::MethodNotAllowed => serde_json::json!({
                "success": false,
                "message": "Method not allowed",
            }),
            AppError::RateLimited => serde_json::json!({
                "success": false,
                "message": RATE_LIMIT_MESSAGE,
            }),
            AppError::InvalidBody => serde_json::json!({
                "success": false,
                "message": "Invalid request body",
            }),
            AppError::ContentStore(detail) | AppError::Internal(detail) => {
                tracing::error!(%detail, "contact pipeline failure");
                serde_json::json!({
                    "success": false,
                    "message": GENERIC_FAILURE_MESSAGE,
                })
            }
        };

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::InvalidBody => StatusCode::BAD_REQUEST,
            AppError::ContentStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        // The derive collects errors into a map; callers expect the fields
        // reported in form order.
        field_errors.sort_by_key(|e| field_rank(&e.field));

        AppError::Validation(field_errors)
    }
}

fn field_rank(field: &str) -> usize {
    match field {
        "name" => 0,
        "email" => 1,
        "message" => 2,
        _ => 3,
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ContentStore(err.to_string())
    }
}
