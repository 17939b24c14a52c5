//! AES-256 分组密码模式（CTR/CBC）的密钥类型与增量变换实现
use crate::common::utils::{ZeroizingVec, from_base64, to_base64};
use crate::symmetric::errors::SymmetricError;
use aes::Aes256;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use serde::{Deserialize, Serialize};

/// 对称密钥长度（字节）
pub const SYM_KEY_SIZE: usize = 32;
/// IV 长度（字节），等于 AES 的分组长度
pub const IV_SIZE: usize = 16;

const BLOCK_SIZE: usize = 16;

// Node 的 `aes-256-ctr` 把整个 16 字节 IV 当作大端计数器
type Aes256Ctr = ctr::Ctr128BE<Aes256>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// 支持的对称算法（两种 AES-256 分组模式）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    /// AES-256-CTR：流式，无填充，密文与明文等长
    Aes256Ctr,
    /// AES-256-CBC：分组链接，末块 PKCS#7 填充
    Aes256Cbc,
}

/// 未包装的对称密钥，恒为 [`SYM_KEY_SIZE`] 字节，析构时自动擦除。
///
/// 与 [`WrappedKey`] 在类型层面区分开：仍被 RSA 包装的密钥无法误传给
/// 对称解密接口。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetricKey(ZeroizingVec);

impl SymmetricKey {
    /// 从操作系统 CSPRNG 生成一把新密钥
    pub fn generate() -> Result<Self, SymmetricError> {
        let mut key_bytes = vec![0u8; SYM_KEY_SIZE];
        use rand_core::{OsRng, TryRngCore};
        OsRng.try_fill_bytes(&mut key_bytes)?;
        Ok(Self(ZeroizingVec(key_bytes)))
    }

    /// 从原始字节构造，长度必须恰好为 [`SYM_KEY_SIZE`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SymmetricError> {
        if bytes.len() != SYM_KEY_SIZE {
            return Err(SymmetricError::InvalidKeySize {
                expected: SYM_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self(ZeroizingVec(bytes.to_vec())))
    }

    /// 从 Base64 字符串构造
    pub fn from_base64(encoded: &str) -> Result<Self, SymmetricError> {
        Self::from_bytes(&from_base64(encoded)?)
    }

    /// 导出为 Base64 字符串
    pub fn to_base64(&self) -> String {
        to_base64(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// 经 RSA 包装的对称密钥，长度等于 RSA 模数长度。
///
/// 解密前必须先用私钥解包得到 [`SymmetricKey`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedKey(#[serde(with = "serde_bytes")] pub Vec<u8>);

impl WrappedKey {
    /// 从 Base64 字符串构造
    pub fn from_base64(encoded: &str) -> Result<Self, SymmetricError> {
        Ok(Self(from_base64(encoded)?))
    }

    /// 导出为 Base64 字符串
    pub fn to_base64(&self) -> String {
        to_base64(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for WrappedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// 从操作系统 CSPRNG 生成一个新的随机 IV
pub fn generate_iv() -> Result<[u8; IV_SIZE], SymmetricError> {
    let mut iv = [0u8; IV_SIZE];
    use rand_core::{OsRng, TryRngCore};
    OsRng.try_fill_bytes(&mut iv)?;
    Ok(iv)
}

/// 单次使用的增量密码变换。
///
/// 生命周期：创建 → 若干次 `update` → 一次 `finalize`。块顺序严格保持，
/// CBC 的链接依赖这一点。一个变换只属于一条流。
pub(crate) enum CipherTransform {
    Ctr(Aes256Ctr),
    CbcEncrypt {
        cipher: Aes256CbcEnc,
        pending: Vec<u8>,
    },
    CbcDecrypt {
        cipher: Aes256CbcDec,
        pending: Vec<u8>,
        // 最后一个解密出的分组要等到输入结束才能做填充校验
        held: Option<aes::Block>,
    },
}

impl CipherTransform {
    /// 构造正向（加密）变换
    pub(crate) fn encryptor(
        algorithm: CipherAlgorithm,
        key: &SymmetricKey,
        iv: &[u8; IV_SIZE],
    ) -> Self {
        let key = GenericArray::from_slice(key.as_bytes());
        let iv = GenericArray::from_slice(iv);
        match algorithm {
            CipherAlgorithm::Aes256Ctr => Self::Ctr(Aes256Ctr::new(key, iv)),
            CipherAlgorithm::Aes256Cbc => Self::CbcEncrypt {
                cipher: Aes256CbcEnc::new(key, iv),
                pending: Vec::with_capacity(BLOCK_SIZE),
            },
        }
    }

    /// 构造反向（解密）变换。CTR 模式下与正向变换相同。
    pub(crate) fn decryptor(
        algorithm: CipherAlgorithm,
        key: &SymmetricKey,
        iv: &[u8; IV_SIZE],
    ) -> Self {
        let key = GenericArray::from_slice(key.as_bytes());
        let iv = GenericArray::from_slice(iv);
        match algorithm {
            CipherAlgorithm::Aes256Ctr => Self::Ctr(Aes256Ctr::new(key, iv)),
            CipherAlgorithm::Aes256Cbc => Self::CbcDecrypt {
                cipher: Aes256CbcDec::new(key, iv),
                pending: Vec::with_capacity(BLOCK_SIZE),
                held: None,
            },
        }
    }

    /// 变换一段输入，把产出追加到 `out`。产出可以为空（CBC 在凑齐
    /// 整分组之前不输出）。
    pub(crate) fn update(&mut self, input: &[u8], out: &mut Vec<u8>) {
        match self {
            Self::Ctr(cipher) => {
                let start = out.len();
                out.extend_from_slice(input);
                cipher.apply_keystream(&mut out[start..]);
            }
            Self::CbcEncrypt { cipher, pending } => {
                pending.extend_from_slice(input);
                let full = pending.len() - pending.len() % BLOCK_SIZE;
                for chunk in pending[..full].chunks_exact(BLOCK_SIZE) {
                    let mut block = aes::Block::clone_from_slice(chunk);
                    cipher.encrypt_block_mut(&mut block);
                    out.extend_from_slice(&block);
                }
                pending.drain(..full);
            }
            Self::CbcDecrypt {
                cipher,
                pending,
                held,
            } => {
                pending.extend_from_slice(input);
                let full = pending.len() - pending.len() % BLOCK_SIZE;
                for chunk in pending[..full].chunks_exact(BLOCK_SIZE) {
                    let mut block = aes::Block::clone_from_slice(chunk);
                    cipher.decrypt_block_mut(&mut block);
                    if let Some(prev) = held.replace(block) {
                        out.extend_from_slice(&prev);
                    }
                }
                pending.drain(..full);
            }
        }
    }

    /// 输入结束时调用一次：CBC 加密写出填充末块，CBC 解密校验并剥除
    /// 填充。CTR 无终结工作。
    pub(crate) fn finalize(&mut self, out: &mut Vec<u8>) -> Result<(), SymmetricError> {
        match self {
            Self::Ctr(_) => Ok(()),
            Self::CbcEncrypt { cipher, pending } => {
                // PKCS#7：末块恒有 1..=16 字节填充，空明文也产出一整块
                let pad = (BLOCK_SIZE - pending.len()) as u8;
                let mut block_bytes = [pad; BLOCK_SIZE];
                block_bytes[..pending.len()].copy_from_slice(pending);
                let mut block = aes::Block::from(block_bytes);
                cipher.encrypt_block_mut(&mut block);
                out.extend_from_slice(&block);
                pending.clear();
                Ok(())
            }
            Self::CbcDecrypt { pending, held, .. } => {
                if !pending.is_empty() {
                    return Err(SymmetricError::MalformedCiphertext(format!(
                        "length is not a multiple of the {BLOCK_SIZE}-byte block size"
                    )));
                }
                let block = held.take().ok_or_else(|| {
                    SymmetricError::MalformedCiphertext("ciphertext is empty".to_string())
                })?;
                let pad = block[BLOCK_SIZE - 1] as usize;
                if pad == 0
                    || pad > BLOCK_SIZE
                    || block[BLOCK_SIZE - pad..].iter().any(|&b| b != pad as u8)
                {
                    return Err(SymmetricError::Padding);
                }
                out.extend_from_slice(&block[..BLOCK_SIZE - pad]);
                Ok(())
            }
        }
    }
}
