use std::fmt;

use super::model::{Role, RoleMismatch};
use super::password::PasswordError;
use crate::modules::storage::StorageError;

/// Everything a directory operation can report back to its caller
#[derive(Debug)]
pub enum DirectoryError {
    DuplicateEmail,
    InvalidCredentials, // Deliberately says nothing about which half was wrong
    NotFound(String),
    MissingField(&'static str),
    WeakPassword(PasswordError),
    InvalidEmail,
    RoleMismatch { expected: Role, found: Role },
    Storage(StorageError),
}

impl From<StorageError> for DirectoryError {
    fn from(error: StorageError) -> Self {
        DirectoryError::Storage(error)
    }
}

impl From<PasswordError> for DirectoryError {
    fn from(error: PasswordError) -> Self {
        DirectoryError::WeakPassword(error)
    }
}

impl From<RoleMismatch> for DirectoryError {
    fn from(error: RoleMismatch) -> Self {
        DirectoryError::RoleMismatch {
            expected: error.expected,
            found: error.found,
        }
    }
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::DuplicateEmail => {
                write!(f, "An account with this email already exists")
            }
            DirectoryError::InvalidCredentials => write!(f, "Invalid email or password"),
            DirectoryError::NotFound(id) => write!(f, "No account with id {}", id),
            DirectoryError::MissingField(field) => write!(f, "Please enter your {}", field),
            DirectoryError::WeakPassword(e) => write!(f, "{}", e),
            DirectoryError::InvalidEmail => write!(f, "Please enter a valid email address"),
            DirectoryError::RoleMismatch { expected, found } => write!(
                f,
                "Cannot apply {} profile data to a {} account",
                found, expected
            ),
            DirectoryError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectoryError::Storage(e) => Some(e),
            _ => None,
        }
    }
}
