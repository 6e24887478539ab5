// Route exports
pub mod reef;

use actix_web::{error, http::StatusCode, web, HttpResponse};

use crate::models::ErrorResponse;

/// Reef endpoints live at the root, where existing map clients expect them
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(reef::configure);
}

/// JSON error for rejected request payloads
#[derive(Debug)]
pub struct JsonError(pub ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle query payload errors (missing or non-numeric bounds)
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    })
    .into()
}
