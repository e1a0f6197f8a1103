use actix_web::{error::JsonPayloadError, HttpRequest};

use crate::errors::AppError;

/// Maps body deserialization failures onto the same response envelope as
/// the rest of the pipeline.
pub fn json_body_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "rejecting malformed request body");
    AppError::InvalidBody.into()
}
