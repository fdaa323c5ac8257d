use actix_web::{web, HttpResponse};
use validator::Validate;

use rb_core::errors::{MISSING_USER_OR_CODE, VERIFY_SUCCEEDED};
use rb_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::{VerifiedCodeData, VerifyCodeRequest};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /verify
///
/// Consumes the latest active code of `user_id` if `otp` matches it.
///
/// ## Errors
/// - 400 `{ message }` when a field is missing
/// - 400 `{ message, error: "mismatch" }`
/// - 404 `{ message, error: "not_found_or_expired" }`
/// - 500 `{ message, error }` when the store fails
pub async fn verify_code(
    state: web::Data<AppState>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors, MISSING_USER_OR_CODE);
    }

    match state
        .verification_service
        .verify(request.user_id.as_deref(), request.otp.as_deref())
        .await
    {
        Ok(verified) => HttpResponse::Ok().json(MessageResponse::success(
            VERIFY_SUCCEEDED,
            VerifiedCodeData::from(verified),
        )),
        Err(error) => handle_domain_error(error),
    }
}
