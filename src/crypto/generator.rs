//! Random password generation for `pm generate` and `pm add --generate`.

use rand::Rng;

use crate::errors::{PmError, Result};

/// Characters a generated password may contain.
pub const CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;
pub const DEFAULT_LENGTH: usize = 16;

/// Generate a password of `length` characters drawn uniformly from `CHARSET`.
pub fn generate_password(length: usize) -> Result<String> {
    if length < MIN_LENGTH {
        return Err(PmError::InvalidLength(format!(
            "password length must be at least {MIN_LENGTH} characters"
        )));
    }
    if length > MAX_LENGTH {
        return Err(PmError::InvalidLength(format!(
            "password length cannot exceed {MAX_LENGTH} characters"
        )));
    }

    let mut rng = rand::rng();
    let password = (0..length)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect();
    Ok(password)
}
