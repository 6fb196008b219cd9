//! Password reset for a signed-in (or recovery-link) session.

#[cfg(test)]
#[path = "reset_test.rs"]
mod reset_test;

use crate::remote::{IdentityService, RemoteError, UserUpdate};
use crate::routes::Screen;

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match!";
pub const RESET_FAILED_MESSAGE: &str = "There was an error updating your password.";
pub const RESET_SUCCESS_MESSAGE: &str = "Password updated successfully!";

#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ResetError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PasswordMismatch => PASSWORD_MISMATCH_MESSAGE,
            Self::Remote(_) => RESET_FAILED_MESSAGE,
        }
    }
}

/// # Errors
///
/// Returns [`ResetError::PasswordMismatch`] when the two entries differ.
pub fn check_passwords(new_password: &str, reentered: &str) -> Result<(), ResetError> {
    if new_password == reentered { Ok(()) } else { Err(ResetError::PasswordMismatch) }
}

/// Update the password and return where to send the user next.
///
/// # Errors
///
/// Returns [`ResetError::PasswordMismatch`] before any remote call if the
/// entries differ, or [`ResetError::Remote`] if the service rejects the update.
pub async fn reset_password(
    service: &dyn IdentityService,
    new_password: &str,
    reentered: &str,
) -> Result<&'static str, ResetError> {
    check_passwords(new_password, reentered)?;
    service
        .update_user(&UserUpdate { password: new_password.to_owned() })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "password update failed"))?;
    tracing::info!("password updated");
    Ok(Screen::SignIn.path())
}
