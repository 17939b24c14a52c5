use crate::asymmetric::errors::AsymmetricError;
use crate::symmetric::errors::SymmetricError;
use thiserror::Error;

/// 加密操作可能遇到的错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Asymmetric cryptographic error")]
    Asymmetric(#[from] AsymmetricError),

    #[error("Symmetric cryptographic error")]
    Symmetric(#[from] SymmetricError),
}
