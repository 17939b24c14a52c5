//! 基于 `rsa` crate 的非对称包装实现。
//!
//! 接受 PEM 格式的密钥：公钥可以是 SPKI（`PUBLIC KEY`）或 PKCS#1
//! （`RSA PUBLIC KEY`），私钥可以是 PKCS#8（`PRIVATE KEY`）或 PKCS#1
//! （`RSA PRIVATE KEY`）。填充方案在加解密两侧必须一致：PKCS#1 v1.5 与
//! OAEP 互不兼容，错配会得到确定性的解密失败而不是静默的垃圾输出。

use crate::asymmetric::errors::AsymmetricError;
use crate::common::config::CryptoConfig;
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;

/// 非对称填充方案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsymmetricPadding {
    /// RSA PKCS#1 v1.5（默认/兼容旧实现）
    Pkcs1v15,
    /// RSA OAEP，摘要为 SHA-1（现代、推荐）
    OaepSha1,
}

impl AsymmetricPadding {
    /// 填充占用的字节数：明文上限为模数长度减去该开销
    pub fn overhead(self) -> usize {
        match self {
            Self::Pkcs1v15 => 11,
            // 2 * SHA-1 摘要长度 + 2
            Self::OaepSha1 => 42,
        }
    }
}

/// 解析 PEM 公钥，SPKI 和 PKCS#1 两种头部均可
pub fn parse_public_key(pem: &str) -> Result<RsaPublicKey, AsymmetricError> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| AsymmetricError::InvalidKey(format!("failed to parse RSA public key: {e}")))
}

/// 解析 PEM 私钥，PKCS#8 和 PKCS#1 两种头部均可
pub fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, AsymmetricError> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| AsymmetricError::InvalidKey(format!("failed to parse RSA private key: {e}")))
}

/// 使用公钥加密一小段数据（通常是对称密钥）。
///
/// 明文必须不超过模数长度减去填充开销，超出时返回
/// [`AsymmetricError::CapacityExceeded`]，绝不截断。
pub fn encrypt(
    padding: AsymmetricPadding,
    public_key_pem: &str,
    plaintext: &[u8],
) -> Result<Vec<u8>, AsymmetricError> {
    let public_key = parse_public_key(public_key_pem)?;

    let limit = public_key.size().saturating_sub(padding.overhead());
    if plaintext.len() > limit {
        return Err(AsymmetricError::CapacityExceeded {
            limit,
            actual: plaintext.len(),
        });
    }

    let mut rng = OsRng;
    let result = match padding {
        AsymmetricPadding::Pkcs1v15 => public_key.encrypt(&mut rng, Pkcs1v15Encrypt, plaintext),
        AsymmetricPadding::OaepSha1 => public_key.encrypt(&mut rng, Oaep::new::<Sha1>(), plaintext),
    };
    result.map_err(|e| AsymmetricError::Encryption(e.to_string()))
}

/// 使用私钥解密。
///
/// 密钥不匹配或填充校验失败时返回 [`AsymmetricError::Decryption`]，
/// 不区分具体原因。
pub fn decrypt(
    padding: AsymmetricPadding,
    private_key_pem: &str,
    ciphertext: &[u8],
) -> Result<Vec<u8>, AsymmetricError> {
    let private_key = parse_private_key(private_key_pem)?;

    let result = match padding {
        AsymmetricPadding::Pkcs1v15 => private_key.decrypt(Pkcs1v15Encrypt, ciphertext),
        AsymmetricPadding::OaepSha1 => private_key.decrypt(Oaep::new::<Sha1>(), ciphertext),
    };
    result.map_err(|_| AsymmetricError::Decryption)
}

/// 生成一对新的 RSA 密钥，返回 `(公钥 PEM, 私钥 PEM)`。
///
/// 公钥导出为 SPKI，私钥导出为 PKCS#8。
pub fn generate_keypair(config: &CryptoConfig) -> Result<(String, String), AsymmetricError> {
    let mut rng = OsRng;
    let private_key = RsaPrivateKey::new(&mut rng, config.rsa_key_bits)
        .map_err(|e| AsymmetricError::KeyGeneration(e.to_string()))?;
    let public_key = RsaPublicKey::from(&private_key);

    let public_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| AsymmetricError::KeyGeneration(e.to_string()))?;
    let private_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| AsymmetricError::KeyGeneration(e.to_string()))?
        .to_string();

    Ok((public_pem, private_pem))
}
