//! Signup payload validation and password hashing
//!
//! Uses argon2id with a random salt; hashes are stored as PHC strings.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use serde::Deserialize;
use thiserror::Error;

use crate::model::NewUser;

/// Errors produced while turning a signup form into a new user
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Enter the required fields")]
    MissingFields,

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Signup form as posted by the browser
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(rename = "inputName")]
    pub name: Option<String>,
    #[serde(rename = "inputEmail")]
    pub email: Option<String>,
    #[serde(rename = "inputPassword")]
    pub password: Option<String>,
}

/// Signup form with every field present and non-blank
#[derive(Debug, Clone, PartialEq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    /// Check that every field was sent and is not blank.
    ///
    /// Name and email are trimmed; the password is kept verbatim.
    pub fn validate(self) -> Result<SignupRequest, SignupError> {
        let name = required(self.name.as_deref().map(str::trim))?;
        let email = required(self.email.as_deref().map(str::trim))?;
        let password = required(self.password.as_deref().filter(|p| !p.trim().is_empty()))?;

        Ok(SignupRequest {
            name,
            email,
            password,
        })
    }
}

fn required(value: Option<&str>) -> Result<String, SignupError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SignupError::MissingFields),
    }
}

impl SignupRequest {
    /// Hash the password and produce the row storage will insert
    pub fn into_new_user(self) -> Result<NewUser, SignupError> {
        let password_hash = hash_password(&self.password)?;
        Ok(NewUser {
            name: self.name,
            email: self.email,
            password_hash,
        })
    }
}

/// Hash a password using argon2id
pub fn hash_password(password: &str) -> Result<String, SignupError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SignupError::Hash(e.to_string()))
}
