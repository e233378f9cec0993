//! Subcommand implementations.
//!
//! Each command drives one of the storefront's view controllers and prints
//! what the page would show.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod seller;

use std::io::{self, IsTerminal};

use secrecy::SecretString;
use thiserror::Error;

use bazaar_storefront::views::{Notice, Route};

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The page showed an error message.
    #[error("{0}")]
    Rejected(String),

    /// The page wants a different route first, e.g. login.
    #[error("{message} (see `bazaar {hint}`)")]
    Redirected {
        message: String,
        hint: &'static str,
    },

    /// No `--password` was given and stdin cannot prompt for one.
    #[error("No password given. Pass --password or run in a terminal")]
    PasswordRequired,

    /// Reading from the terminal failed.
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    pub(crate) fn redirect(message: impl Into<String>, route: Route) -> Self {
        Self::Redirected {
            message: message.into(),
            hint: command_for(route),
        }
    }
}

/// The subcommand that plays the role of a page.
const fn command_for(route: Route) -> &'static str {
    match route {
        Route::Home => "products",
        Route::Login => "login",
        Route::Register => "register",
        Route::Cart => "cart show",
        Route::Seller => "seller list",
        Route::Admin => "whoami",
    }
}

/// Print a success notice, or turn an error notice into a failure.
pub(crate) fn print_notice(notice: Option<&Notice>) -> Result<(), CommandError> {
    match notice {
        Some(notice) if notice.is_error() => Err(CommandError::Rejected(notice.message.clone())),
        Some(notice) => {
            println!("{notice}");
            Ok(())
        }
        None => Ok(()),
    }
}

/// Use the password given on the command line, or prompt for one without
/// echo when stdin is a terminal.
pub(crate) fn password(given: Option<String>) -> Result<SecretString, CommandError> {
    password_from(given, io::stdin().is_terminal())
}

fn password_from(given: Option<String>, interactive: bool) -> Result<SecretString, CommandError> {
    if let Some(password) = given {
        return Ok(SecretString::from(password));
    }
    if !interactive {
        return Err(CommandError::PasswordRequired);
    }

    eprint!("Password: ");
    let password = rpassword::read_password()?;
    Ok(SecretString::from(password))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_given_password_is_used_as_is() {
        let secret = password_from(Some("hunter2".to_owned()), false).unwrap();
        assert_eq!(secret.expose_secret(), "hunter2");
    }

    #[test]
    fn test_missing_password_without_terminal_fails() {
        let err = password_from(None, false).unwrap_err();
        assert!(matches!(err, CommandError::PasswordRequired));
        assert!(err.to_string().contains("--password"));
    }

    #[test]
    fn test_error_notice_fails_command() {
        assert!(print_notice(Some(&Notice::error("nope"))).is_err());
        assert!(print_notice(Some(&Notice::success("fine"))).is_ok());
        assert!(print_notice(None).is_ok());
    }

    #[test]
    fn test_redirect_names_command() {
        let err = CommandError::redirect("Please login to checkout", Route::Login);
        assert_eq!(
            err.to_string(),
            "Please login to checkout (see `bazaar login`)"
        );
    }
}
