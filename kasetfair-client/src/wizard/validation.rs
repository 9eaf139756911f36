//! Validation for the create-store step.
//!
//! Runs before any request is sent; a failure means no network call.

use once_cell::sync::Lazy;
use regex::Regex;
use shared::models::{CreateStoreRequest, StoreType};
use thiserror::Error;

/// Minimum number of member emails a store needs.
pub const MIN_MEMBERS: usize = 3;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Validation errors that can occur on the create-store step.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ValidationError {
    /// Store name is empty after trimming
    #[error("Please enter a store name.")]
    StoreNameRequired,
    /// Fewer than [`MIN_MEMBERS`] non-empty member emails
    #[error("Please provide at least {required} member emails.")]
    NotEnoughMembers { required: usize },
    /// At least one member email is not `local@domain.tld`
    #[error("One or more member emails are invalid.")]
    InvalidMemberEmail,
}

/// Checks the `local@domain.tld` shape used for member emails.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Trims every entry and drops the empty ones.
#[must_use]
pub fn normalize_member_emails(members: &[String]) -> Vec<String> {
    members
        .iter()
        .map(|email| email.trim())
        .filter(|email| !email.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validates a store name.
///
/// # Errors
/// [`ValidationError::StoreNameRequired`] when the name is blank.
pub fn validate_store_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::StoreNameRequired);
    }
    Ok(trimmed.to_string())
}

/// Validates member emails and returns the normalized list.
///
/// # Errors
/// [`ValidationError::NotEnoughMembers`] or [`ValidationError::InvalidMemberEmail`].
pub fn validate_member_emails(members: &[String]) -> Result<Vec<String>, ValidationError> {
    let emails = normalize_member_emails(members);
    if emails.len() < MIN_MEMBERS {
        return Err(ValidationError::NotEnoughMembers {
            required: MIN_MEMBERS,
        });
    }
    if emails.iter().any(|email| !is_valid_email(email)) {
        return Err(ValidationError::InvalidMemberEmail);
    }
    Ok(emails)
}

/// Builds the create-store request, checking name first, then members.
///
/// # Errors
/// The first [`ValidationError`] found.
pub fn build_create_request(
    store_type: StoreType,
    store_name: &str,
    members: &[String],
) -> Result<CreateStoreRequest, ValidationError> {
    let store_name = validate_store_name(store_name)?;
    let member_gmails = validate_member_emails(members)?;
    Ok(CreateStoreRequest {
        store_name,
        store_type,
        member_gmails,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emails(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@ku.th"));
        assert!(is_valid_email("first.last+fair@gmail.com"));
        assert!(!is_valid_email("a@ku"));
        assert!(!is_valid_email("a ku@ku.th"));
        assert!(!is_valid_email("@ku.th"));
        assert!(!is_valid_email("a@@ku.th"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_validate_store_name() {
        assert_eq!(validate_store_name("  Drinks "), Ok("Drinks".to_string()));
        assert_eq!(
            validate_store_name("   "),
            Err(ValidationError::StoreNameRequired)
        );
    }

    #[test]
    fn test_blank_entries_do_not_count_as_members() {
        let members = emails(&["a@ku.th", "  ", "b@ku.th", ""]);
        assert_eq!(
            validate_member_emails(&members),
            Err(ValidationError::NotEnoughMembers { required: 3 })
        );
    }

    #[test]
    fn test_one_bad_email_fails_the_list() {
        let members = emails(&["a@ku.th", "b@ku.th", "c-at-ku.th"]);
        assert_eq!(
            validate_member_emails(&members),
            Err(ValidationError::InvalidMemberEmail)
        );
    }

    #[test]
    fn test_member_emails_are_trimmed() {
        let members = emails(&[" a@ku.th", "b@ku.th ", " c@ku.th ", ""]);
        assert_eq!(
            validate_member_emails(&members),
            Ok(emails(&["a@ku.th", "b@ku.th", "c@ku.th"]))
        );
    }

    #[test]
    fn test_name_is_checked_before_members() {
        assert_eq!(
            build_create_request(StoreType::Nisit, "", &[]),
            Err(ValidationError::StoreNameRequired)
        );
    }

    #[test]
    fn test_build_create_request() {
        let request = build_create_request(
            StoreType::Club,
            " Drinks ",
            &emails(&["a@ku.th", "b@ku.th", "c@ku.th"]),
        )
        .unwrap();
        assert_eq!(request.store_name, "Drinks");
        assert_eq!(request.store_type, StoreType::Club);
        assert_eq!(request.member_gmails.len(), 3);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::NotEnoughMembers { required: 3 }.to_string(),
            "Please provide at least 3 member emails."
        );
        assert_eq!(
            ValidationError::InvalidMemberEmail.to_string(),
            "One or more member emails are invalid."
        );
    }
}
