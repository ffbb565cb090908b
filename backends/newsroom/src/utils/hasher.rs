use password_hash::{PasswordHash, PasswordVerifier, SaltString};

use crate::{db::UNUSABLE_PASSWORD, error::AppResult};

pub fn hash_password(password: impl AsRef<[u8]>) -> AppResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());

    let hash = PasswordHash::generate(argon2::Argon2::default(), password.as_ref(), &salt)?
        .to_string();
    Ok(hash)
}

/// Checks `password` against a stored PHC string. Unusable hashes never match.
pub fn verify_password(password: impl AsRef<[u8]>, stored: &str) -> AppResult<bool> {
    if stored == UNUSABLE_PASSWORD {
        return Ok(reject_without_hash(password));
    }

    let hash = PasswordHash::new(stored)?;
    match argon2::Argon2::default().verify_password(password.as_ref(), &hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Runs one argon2 derivation of `password` and reports no match.
///
/// Used where there is no stored hash to check against, so the answer takes
/// as long as a real verification.
pub fn reject_without_hash(password: impl AsRef<[u8]>) -> bool {
    if let Err(err) = hash_password(password) {
        tracing::debug!(error = %err, "dummy password hash failed");
    }
    false
}
