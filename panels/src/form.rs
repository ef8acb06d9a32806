//! Local form validation shared by the sign-up page and the sign-up route.

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

// Fixed banner text. Provider errors are never shown verbatim.
pub const SIGN_IN_FAILED: &str = "Failed to sign in. Please check your credentials.";
pub const SIGN_UP_FAILED: &str = "Failed to create an account. Email may be already in use.";
pub const RESET_FAILED: &str = "Failed to reset password";
pub const RESET_SENT: &str = "Check your email for further instructions";
pub const LOG_OUT_FAILED: &str = "Failed to log out";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignupError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Enter an email address")]
    MissingEmail,
}

/// Check sign-up input before it is sent anywhere.
///
/// The confirmation is compared first, then the length.
///
/// # Errors
///
/// Returns the first failed rule.
pub fn validate_signup(email: &str, password: &str, confirm_password: &str) -> Result<(), SignupError> {
    if password != confirm_password {
        return Err(SignupError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SignupError::PasswordTooShort);
    }
    if email.trim().is_empty() {
        return Err(SignupError::MissingEmail);
    }
    Ok(())
}
