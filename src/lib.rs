//! # Envelope-Kit: Streaming Envelope Encryption
//!
//! `envelope-kit` implements hybrid ("envelope") encryption: RSA protects a
//! small, randomly generated symmetric key, while the bulk payload (a byte
//! stream of any size) is encrypted with that key using an AES-256 block
//! cipher mode (CTR or CBC).
//!
//! ## Core Concepts
//!
//! - **[`EncryptionEngine`]**: an immutable, reusable value bound to one
//!   symmetric algorithm and one RSA padding scheme. Created only through the
//!   four named constructors ([`EncryptionEngine::aes_256_ctr`] and friends).
//! - **[`Envelope`]**: the result of a symmetric encryption: a lazy
//!   ciphertext stream, the RSA-wrapped symmetric key, and the IV. All three
//!   must be kept together; losing any one makes the envelope undecryptable.
//! - **[`SymmetricKey`] / [`WrappedKey`]**: distinct types for the unwrapped
//!   and the RSA-wrapped key, so a still-wrapped key can never be fed to the
//!   symmetric decryptor by mistake.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::io::{Cursor, Read};
//! use envelope_kit::{generate_keypair, CryptoConfig, EncryptionEngine};
//!
//! fn main() -> Result<(), envelope_kit::Error> {
//!     let (public_pem, private_pem) = generate_keypair(&CryptoConfig::default())?;
//!     let engine = EncryptionEngine::aes_256_ctr_oaep();
//!
//!     // Encrypt: the ciphertext stream is produced lazily as it is read.
//!     let mut envelope = engine.encrypt_sym(&public_pem, Cursor::new(b"big payload".to_vec()))?;
//!     let mut ciphertext = Vec::new();
//!     envelope.data.read_to_end(&mut ciphertext)?;
//!
//!     // Decrypt: unwrap the symmetric key first, then feed key + IV + stream.
//!     let key = engine.unwrap_key(&private_pem, &envelope.encrypted_key)?;
//!     let mut plaintext = Vec::new();
//!     engine
//!         .decrypt_sym(&key, &envelope.iv, Cursor::new(ciphertext))?
//!         .read_to_end(&mut plaintext)?;
//!
//!     assert_eq!(plaintext, b"big payload");
//!     Ok(())
//! }
//! ```
//!
//! ## Security Notes
//!
//! Neither CTR nor CBC provides integrity or authenticity: there is no MAC
//! and no AEAD tag. A tampered ciphertext (or IV) decrypts to garbage under
//! CTR without any error being raised. Callers who need tamper detection
//! must layer authentication on top, or use an authenticated scheme instead.
//!
//! Key and IV material always comes from the operating system CSPRNG.

pub mod asymmetric;
pub mod common;
pub mod engine;
pub mod symmetric;

pub use asymmetric::errors::AsymmetricError;
pub use asymmetric::rsa::{AsymmetricPadding, generate_keypair};
pub use common::config::CryptoConfig;
pub use common::errors::Error;
pub use common::streaming::StreamingConfig;
pub use engine::{EncryptionEngine, Envelope};
pub use symmetric::cipher::{CipherAlgorithm, SymmetricKey, WrappedKey};
pub use symmetric::errors::SymmetricError;
pub use symmetric::streaming::CipherStream;

/// The version of the `envelope-kit` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
