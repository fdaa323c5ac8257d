//! One-time code route handlers
//!
//! - `POST /send`: forward a caller-supplied code
//! - `POST /otp/issue`: generate, store and deliver a code
//! - `POST /verify`: consume a stored code

use actix_web::web;

pub mod issue;
pub mod send;
pub mod verify;

/// Register the one-time code routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/send", web::post().to(send::send_code))
        .route("/verify", web::post().to(verify::verify_code))
        .route("/otp/issue", web::post().to(issue::issue_code));
}
