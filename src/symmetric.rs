//! 对称加密核心模块

pub mod cipher;
pub mod errors;
pub mod streaming;

pub use cipher::{CipherAlgorithm, SymmetricKey, WrappedKey};
pub use errors::SymmetricError;
pub use streaming::CipherStream;
