//! 通用模块，包含错误处理、配置和工具函数

pub mod config;
pub mod errors;
pub mod streaming;
pub mod utils;

pub use self::config::CryptoConfig;
pub use self::errors::Error;
pub use self::streaming::StreamingConfig;
pub use self::utils::{from_base64, to_base64};
