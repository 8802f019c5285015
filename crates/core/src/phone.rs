//! Phone number rules used by the author scan endpoints.

/// Number of characters in a well-formed phone number (area code + 9 digits).
pub const EXPECTED_PHONE_LEN: usize = 11;

/// Returns `true` when `phone` does not have exactly [`EXPECTED_PHONE_LEN`]
/// characters.
///
/// A missing phone counts as length zero, so it is reported as invalid.
/// Length is measured in characters, not bytes.
pub fn has_invalid_length(phone: Option<&str>) -> bool {
    phone.map_or(0, |p| p.chars().count()) != EXPECTED_PHONE_LEN
}
