//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").expect("valid E.164 pattern")
});

// Vietnamese mobile number in national format
static VIETNAM_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0[35789]\d{8}$").expect("valid national mobile pattern")
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number looks dialable (E.164 or national mobile format)
pub fn is_plausible_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    INTERNATIONAL_PHONE_REGEX.is_match(&normalized) || VIETNAM_MOBILE_REGEX.is_match(&normalized)
}

/// Mask a phone number for logs (e.g., +84****4567)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
