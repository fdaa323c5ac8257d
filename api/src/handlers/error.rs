//! Conversion of domain and request errors into HTTP responses

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use rb_core::errors::{
    DomainError, CODE_MISMATCH, CODE_NOT_FOUND_OR_EXPIRED, INTERNAL_FAILURE, INVALID_REQUEST_BODY,
    SEND_FAILED,
};
use rb_shared::MessageResponse;

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// | error               | status | body                              |
/// |---------------------|--------|-----------------------------------|
/// | `Validation`        | 400    | `{ message }`                     |
/// | `Mismatch`          | 400    | `{ message, error: "mismatch" }`  |
/// | `NotFoundOrExpired` | 404    | `{ message, error: "not_found_or_expired" }` |
/// | `Delivery`          | 500    | `{ message, error: <provider text> }` |
/// | `Internal`          | 500    | `{ message, error: "internal_error" }` |
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match &error {
        DomainError::Validation { message } => {
            log::warn!("Rejected request: {}", message);
            HttpResponse::BadRequest().json(MessageResponse::message(message.as_str()))
        }
        DomainError::Mismatch => {
            HttpResponse::BadRequest().json(MessageResponse::failure(CODE_MISMATCH, error.code()))
        }
        DomainError::NotFoundOrExpired => HttpResponse::NotFound()
            .json(MessageResponse::failure(CODE_NOT_FOUND_OR_EXPIRED, error.code())),
        DomainError::Delivery(delivery) => {
            log::error!("Code delivery failed: {}", delivery);
            HttpResponse::InternalServerError()
                .json(MessageResponse::failure(SEND_FAILED, delivery.to_string()))
        }
        DomainError::Internal { .. } => {
            log::error!("Domain Error: {:?}", error);
            HttpResponse::InternalServerError()
                .json(MessageResponse::failure(INTERNAL_FAILURE, error.code()))
        }
    }
}

/// Map `validator` failures: a missing field yields the endpoint's
/// `missing_message`, anything else is an invalid body
pub fn validation_error_response(errors: &ValidationErrors, missing_message: &str) -> HttpResponse {
    let field_errors = errors.field_errors();
    let missing = field_errors
        .values()
        .flat_map(|errors| errors.iter())
        .any(|e| e.code == "required");

    if missing {
        return HttpResponse::BadRequest().json(MessageResponse::message(missing_message));
    }

    let mut fields: Vec<String> = field_errors.keys().map(|field| field.to_string()).collect();
    fields.sort();
    HttpResponse::BadRequest().json(MessageResponse::failure(
        INVALID_REQUEST_BODY,
        format!("invalid field(s): {}", fields.join(", ")),
    ))
}

/// `JsonConfig` error handler: malformed bodies get the standard envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Malformed JSON body on {}: {}", req.path(), err);
    let response =
        HttpResponse::BadRequest().json(MessageResponse::failure(INVALID_REQUEST_BODY, err.to_string()));
    InternalError::from_response(err, response).into()
}
