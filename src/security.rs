//! Security helpers (random strings, password hashing)

use rand::Rng;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Work factor for stored password hashes.
pub const BCRYPT_COST: u32 = 10;

/// Generate a random alphanumeric string of `len` characters.
pub fn random_string(len: usize) -> String {
    let mut rng = rand::rng();

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..ALPHANUMERIC.len());
            ALPHANUMERIC[idx] as char
        })
        .collect()
}

/// Hash a password with bcrypt. The salt and cost are embedded in the output.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Check `password` against a value produced by [`hash_password`].
///
/// A stored value that is not a bcrypt hash never matches.
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}
