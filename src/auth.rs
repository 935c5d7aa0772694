//! Admin credentials: a single username and a SHA-256 password hash.

use sha2::{Digest, Sha256};
use std::fmt;

/// Lowercase hex SHA-256 of `password`.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingCredentials,
    InvalidCredentials,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Username and password are required"),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
        }
    }
}

impl std::error::Error for AuthError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
}

impl AdminCredentials {
    /// Credentials from a stored hash. The hash is compared case-insensitively.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password_hash: password_hash.into().trim().to_ascii_lowercase(),
        }
    }

    pub fn from_password(username: impl Into<String>, password: &str) -> Self {
        Self::new(username, hash_password(password))
    }

    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if username == self.username && hash_password(password) == self.password_hash {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
