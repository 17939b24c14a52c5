//! 非对称加密核心模块
//!
//! 在信封加密流程中，RSA 只承担密钥封装的角色：包装与解包随机生成的对称密钥。

pub mod errors;
pub mod rsa;

pub use self::errors::AsymmetricError;
pub use self::rsa::AsymmetricPadding;
