//! Composable field validators and the ordered field-error collection.
//!
//! Every mutating operation validates its input by running a fixed sequence
//! of validators against a [`FieldErrors`] accumulator, so a single bad
//! request reports every failing field at once. The HTTP layer serializes
//! the accumulator as `{"field": ["message", ...]}` with 400.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;

/// Maximum length for user text fields (names, username, email, role, position).
pub const USER_FIELD_MAX_LEN: usize = 50;

/// Maximum length for project names and developer names.
pub const PROJECT_FIELD_MAX_LEN: usize = 100;

/// Special characters of which a password must contain at least one.
pub const PASSWORD_SPECIAL_CHARS: &[char] = &['@', '#', '$', '%', '^', '&', '+', '='];

/// Field-scoped validation messages, in insertion order.
///
/// Fields keep the order in which their first message was pushed and each
/// field keeps its messages in push order, so error bodies are stable and
/// mirror the validation sequence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the given field's list.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for one field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when no messages were recorded, otherwise a
    /// [`CoreError::Validation`] carrying the accumulated errors.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }

    /// A single-field error collection, for store-level duplicate mapping.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Generic text fields
// ---------------------------------------------------------------------------

/// Record a missing required field; present values pass through unchanged.
///
/// Request bodies deserialize required fields as `Option` so an absent key
/// lands here as a field-scoped error instead of a deserialization failure.
pub fn require_field<'a>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    if value.is_none() {
        errors.push(field, "This field is required.");
    }
    value
}

/// Required free-text field: non-blank after trimming, bounded length.
pub fn validate_required_text(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.push(field, "This field may not be blank.");
        return;
    }
    if value.chars().count() > max_len {
        errors.push(field, format!("This field may not exceed {max_len} characters."));
    }
}

// ---------------------------------------------------------------------------
// Project fields
// ---------------------------------------------------------------------------

/// Project name: required and non-blank after trimming. Uniqueness is
/// checked against the store by the caller.
pub fn validate_project_name(errors: &mut FieldErrors, name: &str) {
    if name.trim().is_empty() {
        errors.push("name", "The project name may not be blank.");
        return;
    }
    if name.chars().count() > PROJECT_FIELD_MAX_LEN {
        errors.push(
            "name",
            format!("This field may not exceed {PROJECT_FIELD_MAX_LEN} characters."),
        );
    }
}

/// Developer name: bounded, alphabetic characters and whitespace only.
pub fn validate_developer(errors: &mut FieldErrors, developer: &str) {
    if developer.trim().is_empty() {
        errors.push("developer", "The developer may not be blank.");
        return;
    }
    if developer.chars().count() > PROJECT_FIELD_MAX_LEN {
        errors.push(
            "developer",
            format!("This field may not exceed {PROJECT_FIELD_MAX_LEN} characters."),
        );
    }
    if !developer
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace())
    {
        errors.push(
            "developer",
            "The developer may only contain letters and spaces.",
        );
    }
}

/// Task link: must parse as a well-formed URL.
pub fn validate_task_link(errors: &mut FieldErrors, task_link: &str) {
    if task_link.trim().is_empty() {
        errors.push("task_link", "The task link may not be blank.");
        return;
    }
    if !task_link.validate_url() {
        errors.push("task_link", "Enter a valid URL.");
    }
}

// ---------------------------------------------------------------------------
// User fields
// ---------------------------------------------------------------------------

/// Email: required, bounded, and matching the email address grammar.
pub fn validate_email_format(errors: &mut FieldErrors, email: &str) {
    if email.trim().is_empty() {
        errors.push("email", "This field may not be blank.");
        return;
    }
    if email.chars().count() > USER_FIELD_MAX_LEN {
        errors.push(
            "email",
            format!("This field may not exceed {USER_FIELD_MAX_LEN} characters."),
        );
    }
    if !email.validate_email() {
        errors.push("email", "Enter a valid email address.");
    }
}

/// Password policy. Each unmet rule yields its own message under `password`:
/// length in [8, 20], at least one digit, one letter, one uppercase, one
/// lowercase, and one special character from [`PASSWORD_SPECIAL_CHARS`].
pub fn validate_password(errors: &mut FieldErrors, password: &str) {
    let len = password.chars().count();
    if !(8..=20).contains(&len) {
        errors.push(
            "password",
            "The password must be between 8 and 20 characters.",
        );
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("password", "The password must contain at least one digit.");
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        errors.push("password", "The password must contain at least one letter.");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        errors.push(
            "password",
            "The password must contain at least one uppercase letter.",
        );
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        errors.push(
            "password",
            "The password must contain at least one lowercase letter.",
        );
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(&c)) {
        errors.push(
            "password",
            "The password must contain at least one special character (@, #, $, %, ^, &, + or =).",
        );
    }
}

/// Password confirmation must match the password exactly.
pub fn validate_password_confirmation(errors: &mut FieldErrors, password: &str, confirm: &str) {
    if password != confirm {
        errors.push(
            "confirm_password",
            "The password confirmation does not match.",
        );
    }
}

// ---------------------------------------------------------------------------
// Traceability fields
// ---------------------------------------------------------------------------

/// Execution iteration must be 1, 2, or 3.
pub fn validate_iteration(errors: &mut FieldErrors, iteration: i16) {
    if !(1..=3).contains(&iteration) {
        errors.push("iteration", "The iteration must be 1, 2 or 3.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(errors: &FieldErrors, field: &str) -> Vec<String> {
        errors.get(field).unwrap_or_default().to_vec()
    }

    #[test]
    fn field_errors_preserve_insertion_order() {
        let mut errors = FieldErrors::new();
        errors.push("name", "first");
        errors.push("developer", "second");
        errors.push("name", "third");

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(
            json,
            r#"{"name":["first","third"],"developer":["second"]}"#
        );
    }

    #[test]
    fn empty_field_errors_convert_to_ok() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.push("name", "bad");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn blank_project_name_is_rejected() {
        let mut errors = FieldErrors::new();
        validate_project_name(&mut errors, "   ");
        assert_eq!(
            messages(&errors, "name"),
            vec!["The project name may not be blank."]
        );
    }

    #[test]
    fn developer_accepts_letters_and_spaces_only() {
        let mut errors = FieldErrors::new();
        validate_developer(&mut errors, "Jane Doe");
        assert!(errors.is_empty());

        validate_developer(&mut errors, "Jane99");
        assert_eq!(
            messages(&errors, "developer"),
            vec!["The developer may only contain letters and spaces."]
        );
    }

    #[test]
    fn developer_longer_than_hundred_chars_is_rejected() {
        let mut errors = FieldErrors::new();
        validate_developer(&mut errors, &"a".repeat(101));
        assert_eq!(
            messages(&errors, "developer"),
            vec!["This field may not exceed 100 characters."]
        );

        let mut errors = FieldErrors::new();
        validate_developer(&mut errors, &"a".repeat(100));
        assert!(errors.is_empty());
    }

    #[test]
    fn developer_accepts_accented_letters() {
        let mut errors = FieldErrors::new();
        validate_developer(&mut errors, "José Núñez");
        assert!(errors.is_empty());
    }

    #[test]
    fn task_link_must_be_a_url() {
        let mut errors = FieldErrors::new();
        validate_task_link(&mut errors, "https://ex.com/1");
        assert!(errors.is_empty());

        validate_task_link(&mut errors, "not a url");
        assert_eq!(messages(&errors, "task_link"), vec!["Enter a valid URL."]);
    }

    #[test]
    fn email_grammar_is_enforced() {
        let mut errors = FieldErrors::new();
        validate_email_format(&mut errors, "jane@example.com");
        assert!(errors.is_empty());

        validate_email_format(&mut errors, "not-an-email");
        assert_eq!(
            messages(&errors, "email"),
            vec!["Enter a valid email address."]
        );
    }

    #[test]
    fn weak_password_fails_each_unmet_rule() {
        let mut errors = FieldErrors::new();
        validate_password(&mut errors, "12345");

        let msgs = messages(&errors, "password");
        // Too short, no letter, no uppercase, no lowercase, no special char.
        assert_eq!(msgs.len(), 5);
        assert!(msgs[0].contains("between 8 and 20"));
        assert!(!msgs.iter().any(|m| m.contains("digit")));
    }

    #[test]
    fn strong_password_passes() {
        let mut errors = FieldErrors::new();
        validate_password(&mut errors, "22222222aaaAaQ@a2");
        assert!(errors.is_empty(), "unexpected errors: {errors}");
    }

    #[test]
    fn password_longer_than_twenty_chars_fails_length_rule() {
        let mut errors = FieldErrors::new();
        validate_password(&mut errors, "Aa1@Aa1@Aa1@Aa1@Aa1@X");
        assert_eq!(
            messages(&errors, "password"),
            vec!["The password must be between 8 and 20 characters."]
        );
    }

    #[test]
    fn password_confirmation_must_match_exactly() {
        let mut errors = FieldErrors::new();
        validate_password_confirmation(&mut errors, "Secret@1", "Secret@1");
        assert!(errors.is_empty());

        validate_password_confirmation(&mut errors, "Secret@1", "Secret@2");
        assert_eq!(
            messages(&errors, "confirm_password"),
            vec!["The password confirmation does not match."]
        );
    }

    #[test]
    fn iteration_outside_one_to_three_is_rejected() {
        for valid in [1, 2, 3] {
            let mut errors = FieldErrors::new();
            validate_iteration(&mut errors, valid);
            assert!(errors.is_empty());
        }

        let mut errors = FieldErrors::new();
        validate_iteration(&mut errors, 0);
        validate_iteration(&mut errors, 4);
        assert_eq!(messages(&errors, "iteration").len(), 2);
    }

    #[test]
    fn absent_required_fields_are_recorded() {
        let mut errors = FieldErrors::new();
        assert_eq!(require_field(&mut errors, "name", Some("Alpha")), Some("Alpha"));
        assert!(errors.is_empty());

        assert_eq!(require_field(&mut errors, "developer", None), None);
        assert_eq!(
            messages(&errors, "developer"),
            vec!["This field is required."]
        );
    }

    #[test]
    fn required_text_checks_blank_then_length() {
        let mut errors = FieldErrors::new();
        validate_required_text(&mut errors, "role", "", USER_FIELD_MAX_LEN);
        assert_eq!(
            messages(&errors, "role"),
            vec!["This field may not be blank."]
        );

        let mut errors = FieldErrors::new();
        validate_required_text(&mut errors, "role", &"x".repeat(51), USER_FIELD_MAX_LEN);
        assert_eq!(
            messages(&errors, "role"),
            vec!["This field may not exceed 50 characters."]
        );
    }
}
