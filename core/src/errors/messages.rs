//! User-facing response messages.

pub const MISSING_PHONE_OR_CODE: &str = "Thiếu số điện thoại hoặc mã OTP";
pub const MISSING_USER_OR_PHONE: &str = "Thiếu mã người dùng hoặc số điện thoại";
pub const MISSING_USER_OR_CODE: &str = "Thiếu mã người dùng hoặc mã OTP";

pub const SEND_SUCCEEDED: &str = "Gửi mã OTP thành công";
pub const SEND_FAILED: &str = "Gửi mã OTP thất bại";

pub const VERIFY_SUCCEEDED: &str = "Xác thực OTP thành công";
pub const CODE_NOT_FOUND_OR_EXPIRED: &str = "Mã OTP không hợp lệ hoặc đã hết hạn";
pub const CODE_MISMATCH: &str = "Mã OTP không chính xác";

pub const INVALID_REQUEST_BODY: &str = "Dữ liệu yêu cầu không hợp lệ";
pub const INTERNAL_FAILURE: &str = "Đã xảy ra lỗi hệ thống";
pub const ROUTE_NOT_FOUND: &str = "Không tìm thấy tài nguyên được yêu cầu";
