//!
//! # 通用配置模块
//!
//! 定义密钥生成所使用的加密参数。
//!
use serde::{Deserialize, Serialize};

fn default_rsa_key_bits() -> usize {
    2048
}

/// 加密配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CryptoConfig {
    /// RSA 密钥长度（位）
    #[serde(default = "default_rsa_key_bits")]
    pub rsa_key_bits: usize,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            rsa_key_bits: default_rsa_key_bits(),
        }
    }
}
