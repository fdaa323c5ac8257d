use actix_web::{web, HttpResponse};
use validator::Validate;

use rb_core::errors::MISSING_PHONE_OR_CODE;
use rb_shared::phone::mask_phone_number;
use rb_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::SendCodeRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /send
///
/// Forwards a caller-supplied code to the phone number. Nothing is stored.
///
/// # Request Body
///
/// ```json
/// { "phone": "+84901234567", "otp": "123456" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// The provider's response body is returned unchanged under `data`:
/// ```json
/// { "message": "Gửi mã OTP thành công", "data": { "CodeResult": "100", "SMSID": "..." } }
/// ```
///
/// ## Errors
/// - 400 `{ message }` when `phone` or `otp` is missing
/// - 500 `{ message, error }` when the provider call fails
pub async fn send_code(
    state: web::Data<AppState>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        log::warn!("Validation failed for send_code request: {}", errors);
        return validation_error_response(&errors, MISSING_PHONE_OR_CODE);
    }

    log::info!(
        "Processing send_code request for phone: {}",
        request.phone.as_deref().map(mask_phone_number).unwrap_or_default()
    );

    match state
        .issuance_service
        .issue(request.phone.as_deref(), request.otp.as_deref())
        .await
    {
        Ok(receipt) => HttpResponse::Ok().json(MessageResponse::success(receipt.message, receipt.data)),
        Err(error) => handle_domain_error(error),
    }
}
