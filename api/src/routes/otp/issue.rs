use actix_web::{web, HttpResponse};
use validator::Validate;

use rb_core::errors::{MISSING_USER_OR_PHONE, SEND_SUCCEEDED};
use rb_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::IssueCodeRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /otp/issue
///
/// Generates a code server-side, stores it for `user_id` and sends it to
/// `phone`. The code itself is never part of the response.
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Gửi mã OTP thành công",
///     "data": { "id": "...", "user_id": "u-1", "expires_at": "...", "provider": { "CodeResult": "100" } }
/// }
/// ```
pub async fn issue_code(
    state: web::Data<AppState>,
    request: web::Json<IssueCodeRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors, MISSING_USER_OR_PHONE);
    }

    match state
        .issuance_service
        .issue_generated(request.user_id.as_deref(), request.phone.as_deref())
        .await
    {
        Ok(issued) => {
            log::info!("Issued one-time code {} for user {}", issued.id, issued.user_id);
            HttpResponse::Ok().json(MessageResponse::success(SEND_SUCCEEDED, issued))
        }
        Err(error) => handle_domain_error(error),
    }
}
