//! Field rules.
//!
//! Each rule appends zero or more messages and never stops the others. The
//! only short circuit is inside a single field: an empty required value
//! reports "required" and skips that field's remaining checks.

use regex::Regex;
use std::sync::LazyLock;

pub const COMPANY_NAME_MIN_LEN: usize = 2;
pub const COMPANY_NAME_MAX_LEN: usize = 255;
pub const EMAIL_MAX_LEN: usize = 255;

pub const COMPANY_NAME_REQUIRED: &str = "Company name is required";
pub const COMPANY_NAME_TOO_SHORT: &str = "Company name must be at least 2 characters";
pub const COMPANY_NAME_TOO_LONG: &str = "Company name cannot exceed 255 characters";
pub const COMPANY_NAME_INVALID_CHARS: &str = "Company name contains invalid characters";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const EMAIL_TOO_LONG: &str = "Email cannot exceed 255 characters";
pub const PHONE_INVALID: &str = "Invalid phone number";
pub const WEBSITE_SCHEME: &str = "Website must start with http:// or https://";
pub const WEBSITE_DOMAIN: &str = "Website must contain a domain";
pub const CONVERTED_WITHOUT_CONTACT: &str = "Status cannot be Converted without a contact person";

static COMPANY_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-&.]+$").expect("valid company name pattern"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

// ASCII digits only; `\d` would also accept other Unicode digits.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?[0-9]{3}\)?[-\s]?[0-9]{3}[-\s]?[0-9]{4}$").expect("valid phone pattern")
});

pub fn check_company_name(value: &str, out: &mut Vec<String>) {
    if value.is_empty() {
        out.push(COMPANY_NAME_REQUIRED.to_string());
        return;
    }

    let len = value.chars().count();
    if len < COMPANY_NAME_MIN_LEN {
        out.push(COMPANY_NAME_TOO_SHORT.to_string());
    }
    if len > COMPANY_NAME_MAX_LEN {
        out.push(COMPANY_NAME_TOO_LONG.to_string());
    }
    if !COMPANY_NAME_CHARS.is_match(value) {
        out.push(COMPANY_NAME_INVALID_CHARS.to_string());
    }
}

pub fn check_email(value: &str, out: &mut Vec<String>) {
    if value.is_empty() {
        out.push(EMAIL_REQUIRED.to_string());
        return;
    }

    if !EMAIL_PATTERN.is_match(value) {
        out.push(EMAIL_INVALID.to_string());
    }
    if value.chars().count() > EMAIL_MAX_LEN {
        out.push(EMAIL_TOO_LONG.to_string());
    }
}

/// Membership in an enumerated set; blank values are not checked.
pub fn check_one_of(value: &str, allowed: &[String], message: &str, out: &mut Vec<String>) {
    if value.is_empty() {
        return;
    }
    if !allowed.iter().any(|a| a == value) {
        out.push(message.to_string());
    }
}

pub fn check_phone(value: &str, out: &mut Vec<String>) {
    if value.is_empty() {
        return;
    }
    if !PHONE_PATTERN.is_match(value) {
        out.push(PHONE_INVALID.to_string());
    }
}

pub fn check_website(value: &str, out: &mut Vec<String>) {
    if value.is_empty() {
        return;
    }

    let rest = match value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => {
            out.push(WEBSITE_SCHEME.to_string());
            return;
        }
    };

    if !rest.contains('.') {
        out.push(WEBSITE_DOMAIN.to_string());
    }
}

/// A converted lead needs someone to have converted.
pub fn check_converted_contact(
    status: &str,
    contact_person: &str,
    converted_status: &str,
    out: &mut Vec<String>,
) {
    if status == converted_status && contact_person.is_empty() {
        out.push(CONVERTED_WITHOUT_CONTACT.to_string());
    }
}

/// "<Label> must be one of: A, B, C"
pub fn one_of_message(label: &str, allowed: &[String]) -> String {
    format!("{} must be one of: {}", label, allowed.join(", "))
}
