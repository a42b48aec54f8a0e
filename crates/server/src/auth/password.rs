use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::LazyLock;

/// Argon2id digest of `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when `digest` is not a valid PHC string.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(digest)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Digest checked when a login names an unknown account, so the miss costs
/// one full Argon2 verification like a hit does.
static DUMMY_DIGEST: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("lcms-unknown-account").ok());

/// Run a verification whose result is discarded.
pub fn verify_dummy(password: &str) {
    if let Some(digest) = DUMMY_DIGEST.as_deref() {
        let _ = verify_password(password, digest);
    }
}
