use rand::Rng;
use sha2::{Digest, Sha256};

const PASSWORD_CHARSET: &[u8] =
    b"!#$%&0123456789@ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub fn zero_pad(num: u64, places: usize) -> String {
    format!("{:0>width$}", num, width = places)
}

/// Appends `append` to a comma separated list.
pub fn append_comma(current: &str, append: &str) -> String {
    if current.trim().is_empty() {
        format!("{current}{append}")
    } else {
        format!("{current},{append}")
    }
}

pub fn random_password(places: usize) -> String {
    let mut rng = rand::rng();
    (0..places)
        .map(|_| {
            PASSWORD_CHARSET[rng.random_range(0..PASSWORD_CHARSET.len())]
                as char
        })
        .collect()
}

/// Unsalted SHA-256 digest, lowercase hex.
pub fn get_hashed(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Token of an `Authorization: Bearer <token>` header, or `""`.
pub fn extract_bearer(header: &str) -> String {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("Bearer"), Some(token)) => token.to_string(),
        _ => String::new(),
    }
}
