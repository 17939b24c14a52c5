use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsymmetricError {
    #[error("Invalid PEM key: {0}")]
    InvalidKey(String),

    #[error("Plaintext of {actual} bytes exceeds the {limit}-byte RSA capacity")]
    CapacityExceeded { limit: usize, actual: usize },

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("RSA encryption failed: {0}")]
    Encryption(String),

    #[error("RSA decryption failed (wrong key or padding-scheme mismatch)")]
    Decryption,

    #[error("Base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),
}
