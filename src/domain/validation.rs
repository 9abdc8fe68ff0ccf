//! Client-side validation rules for the authentication and story forms.
//!
//! Each check produces the exact message shown next to the form. Checks run
//! in a fixed order and the first failure wins.

use thiserror::Error;

/// Minimum username length, counted in characters.
pub const MIN_USERNAME_CHARS: usize = 3;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// A rejected form submission.
///
/// The `Display` output is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Username must be at least 3 characters")]
    UsernameTooShort,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please enter a character name!")]
    MissingCharacterName,

    #[error("Please enter a location/setting for your story!")]
    MissingLocation,
}

/// Returns `true` when `value` is shorter than `min`.
///
/// Length is measured in UTF-16 code units, the way a browser form counts
/// it, so a single emoji outside the BMP counts as two.
pub(crate) fn shorter_than(value: &str, min: usize) -> bool {
    value.encode_utf16().count() < min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_form_copy() {
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "Please fill in all fields"
        );
        assert_eq!(
            ValidationError::MissingLocation.to_string(),
            "Please enter a location/setting for your story!"
        );
    }

    #[test]
    fn test_shorter_than_ignores_byte_length() {
        assert!(shorter_than("ab", MIN_USERNAME_CHARS));
        assert!(!shorter_than("abc", MIN_USERNAME_CHARS));
        // three characters, six bytes
        assert!(!shorter_than("ééé", MIN_USERNAME_CHARS));
    }

    #[test]
    fn test_shorter_than_counts_utf16_units() {
        // two emoji, four UTF-16 units
        assert!(!shorter_than("😀😀", MIN_USERNAME_CHARS));
        assert!(shorter_than("😀", MIN_USERNAME_CHARS));
    }
}
