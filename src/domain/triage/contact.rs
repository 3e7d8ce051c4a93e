//! Contact-circumvention detection.
//!
//! Users sometimes try to move the conversation off-platform by sharing a
//! phone number or email address. Messages carrying either are rejected
//! before any quota accounting or inference call.

use once_cell::sync::Lazy;
use regex::Regex;

/// Brazilian mobile number: optional parenthesized area code, optional
/// space, then a 9-prefixed eight-digit number with optional hyphen.
/// Matches "11987654321", "(11) 98765-4321", "987654321".
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\(?\d{2}\)?\s?)?9\d{4}-?\d{4}").expect("phone pattern is valid")
});

/// Standard local@domain.tld shape.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

/// Returns true if the message contains a phone number or email address.
pub fn contains_circumvention_contact(message: &str) -> bool {
    PHONE_PATTERN.is_match(message) || EMAIL_PATTERN.is_match(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bare_mobile_number() {
        assert!(contains_circumvention_contact("fale comigo no 11987654321"));
    }

    #[test]
    fn detects_number_without_area_code() {
        assert!(contains_circumvention_contact("meu zap: 98765-4321"));
    }

    #[test]
    fn detects_formatted_mobile_number() {
        assert!(contains_circumvention_contact("meu número é (11) 98765-4321"));
    }

    #[test]
    fn detects_email_address() {
        assert!(contains_circumvention_contact("contato@exemplo.com"));
        assert!(contains_circumvention_contact(
            "me escreve em maria.silva+amparo@gmail.com.br"
        ));
    }

    #[test]
    fn plain_text_passes() {
        assert!(!contains_circumvention_contact("me chame de Ana"));
        assert!(!contains_circumvention_contact("tenho 25 anos e moro em SP"));
    }

    #[test]
    fn short_digit_runs_pass() {
        assert!(!contains_circumvention_contact("acordei às 9 e dormi às 23"));
    }
}
