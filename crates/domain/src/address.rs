//! Shipping address format rules.
//!
//! An address is free text but must look like a deliverable Indian
//! street address: long enough, containing letters, digits, and a
//! standalone 6-digit pincode.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted address length, in characters.
pub const MIN_ADDRESS_LEN: usize = 15;

/// Reasons an address fails validation. Each maps to a distinct
/// corrective message shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AddressError {
    #[error("shipping address is required")]
    Missing,

    #[error("shipping address must be at least {MIN_ADDRESS_LEN} characters long")]
    TooShort,

    #[error("shipping address must include street or city name")]
    MissingLetters,

    #[error("shipping address must include house number or pincode")]
    MissingDigits,

    #[error("shipping address must include a valid 6-digit pincode")]
    MissingPincode,
}

/// Validates a shipping (or contact) address, checking rules in
/// order and reporting the first failure.
pub fn validate_address(address: &str) -> Result<(), AddressError> {
    if address.is_empty() {
        return Err(AddressError::Missing);
    }
    if address.chars().count() < MIN_ADDRESS_LEN {
        return Err(AddressError::TooShort);
    }
    if !address.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(AddressError::MissingLetters);
    }
    if !address.chars().any(|c| c.is_ascii_digit()) {
        return Err(AddressError::MissingDigits);
    }
    if !has_pincode(address) {
        return Err(AddressError::MissingPincode);
    }
    Ok(())
}

/// Looks for a standalone run of exactly six digits: a run bordered
/// by word characters (letters, digits, underscore) does not count,
/// so "560001" in "12 Main St 560001" matches but "x560001" and
/// "5600011" do not.
fn has_pincode(address: &str) -> bool {
    let chars: Vec<char> = address.chars().collect();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let bounded_left = start == 0 || !is_word(chars[start - 1]);
            let bounded_right = i == chars.len() || !is_word(chars[i]);
            if i - start == 6 && bounded_left && bounded_right {
                return true;
            }
        } else {
            i += 1;
        }
    }
    false
}
