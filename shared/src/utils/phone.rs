//! Phone number utilities
//!
//! Philippine mobile numbers reach the SMS gateways in one of three shapes:
//! local (`09171234567`), bare country code (`639171234567`) and E.164
//! (`+639171234567`). Each gateway expects one particular shape, so
//! [`PhoneNumber`] offers a named conversion per target. Conversions never
//! fail: input that matches none of the known prefixes passes through
//! unchanged.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Philippine country calling code without the leading `+`
pub const COUNTRY_CODE: &str = "63";

static LOCAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0\d{10}$").unwrap());

static BARE_COUNTRY_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^63\d{10}$").unwrap());

static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+63\d{10}$").unwrap());

/// Recognized shapes of a destination number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneShape {
    /// `0XXXXXXXXXX`
    Local,
    /// `63XXXXXXXXXX`
    BareCountryCode,
    /// `+63XXXXXXXXXX`
    E164,
    /// Anything else; gateways receive it as converted anyway
    Unrecognized,
}

/// A destination number exactly as the caller supplied it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The number as supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the raw string. Used for diagnostics only.
    pub fn shape(&self) -> PhoneShape {
        if LOCAL_REGEX.is_match(&self.0) {
            PhoneShape::Local
        } else if BARE_COUNTRY_CODE_REGEX.is_match(&self.0) {
            PhoneShape::BareCountryCode
        } else if E164_REGEX.is_match(&self.0) {
            PhoneShape::E164
        } else {
            PhoneShape::Unrecognized
        }
    }

    /// `+63XXXXXXXXXX` becomes `0XXXXXXXXXX`; anything else is unchanged
    pub fn to_local(&self) -> String {
        match self.0.strip_prefix("+63") {
            Some(rest) => format!("0{}", rest),
            None => self.0.clone(),
        }
    }

    /// `0XXXXXXXXXX` becomes `63XXXXXXXXXX`; anything else is unchanged
    pub fn to_bare_country_code(&self) -> String {
        match self.0.strip_prefix('0') {
            Some(rest) => format!("{}{}", COUNTRY_CODE, rest),
            None => self.0.clone(),
        }
    }

    /// Numbers already starting with `+` pass through, a leading `0` is
    /// replaced by `+63`, and a bare `63` prefix gains a `+`.
    pub fn to_e164(&self) -> String {
        if self.0.starts_with('+') {
            self.0.clone()
        } else if let Some(rest) = self.0.strip_prefix('0') {
            format!("+{}{}", COUNTRY_CODE, rest)
        } else if self.0.starts_with(COUNTRY_CODE) {
            format!("+{}", self.0)
        } else {
            self.0.clone()
        }
    }

    /// Masked form for logs
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mask a phone number for logging, keeping only the last 4 digits
///
/// ```
/// use mn_shared::mask_phone_number;
/// assert_eq!(mask_phone_number("+639171234567"), "+********4567");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible_digits = 4;
    let masked_count = chars.len() - visible_digits;
    let last_digits: String = chars[masked_count..].iter().collect();

    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(masked_count - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(masked_count), last_digits)
    }
}
