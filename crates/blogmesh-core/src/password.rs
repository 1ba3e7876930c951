//! Password hashing with bcrypt.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}
