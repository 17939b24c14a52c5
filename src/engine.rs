//! 信封加密引擎：算法选择、密钥包装与流式加解密的统一入口
use crate::asymmetric::rsa::{self, AsymmetricPadding};
use crate::common::errors::Error;
use crate::common::streaming::StreamingConfig;
use crate::common::utils::from_base64;
use crate::symmetric::cipher::{
    CipherAlgorithm, IV_SIZE, SYM_KEY_SIZE, SymmetricKey, WrappedKey, generate_iv,
};
use crate::symmetric::errors::SymmetricError;
use crate::symmetric::streaming::CipherStream;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zeroize::Zeroize;

/// 一次对称加密调用的产物。
///
/// 三个字段必须一起持久化或传输：丢失任何一个，信封都无法解密。
/// `data` 是惰性、单次消费的密文流；完整读完之后只能从原始明文
/// 重新加密得到密文。
pub struct Envelope<R> {
    /// 密文流（读取时才逐块产生）
    pub data: CipherStream<R>,
    /// 经 RSA 包装的对称密钥，长度等于 RSA 模数长度
    pub encrypted_key: WrappedKey,
    /// 明文 IV。本身不保密，但必须与包装后的密钥一起保存
    pub iv: [u8; IV_SIZE],
}

/// 信封加密引擎。
///
/// 绑定一种对称算法和一种 RSA 填充方案的不可变值，只能通过四个具名
/// 构造器创建。不持有任何每次操作的可变状态，可以在多个并发的加解密
/// 调用之间复用。
///
/// 注意：对称算法的标签（CTR/CBC）与非对称操作无关。只要填充方案
/// 一致，任何引擎实例都能解密其他引擎实例的非对称输出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptionEngine {
    algorithm: CipherAlgorithm,
    padding: AsymmetricPadding,
}

impl EncryptionEngine {
    /// 对称密钥长度（字节）
    pub const SYM_KEY_SIZE: usize = SYM_KEY_SIZE;
    /// IV 长度（字节）
    pub const IV_SIZE: usize = IV_SIZE;

    /// AES-256-CTR + RSA PKCS#1 v1.5
    pub fn aes_256_ctr() -> Self {
        Self {
            algorithm: CipherAlgorithm::Aes256Ctr,
            padding: AsymmetricPadding::Pkcs1v15,
        }
    }

    /// AES-256-CTR + RSA OAEP (SHA-1)
    pub fn aes_256_ctr_oaep() -> Self {
        Self {
            algorithm: CipherAlgorithm::Aes256Ctr,
            padding: AsymmetricPadding::OaepSha1,
        }
    }

    /// AES-256-CBC + RSA PKCS#1 v1.5
    pub fn aes_256_cbc() -> Self {
        Self {
            algorithm: CipherAlgorithm::Aes256Cbc,
            padding: AsymmetricPadding::Pkcs1v15,
        }
    }

    /// AES-256-CBC + RSA OAEP (SHA-1)
    pub fn aes_256_cbc_oaep() -> Self {
        Self {
            algorithm: CipherAlgorithm::Aes256Cbc,
            padding: AsymmetricPadding::OaepSha1,
        }
    }

    pub fn algorithm(&self) -> CipherAlgorithm {
        self.algorithm
    }

    pub fn padding(&self) -> AsymmetricPadding {
        self.padding
    }

    /// 非对称加密一小段数据。
    ///
    /// 明文上限是 RSA 模数长度减去填充开销（2048 位密钥在 OAEP-SHA1
    /// 下约 214 字节），超出时同步报错，绝不截断。
    pub fn encrypt_asym(&self, public_key_pem: &str, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        Ok(rsa::encrypt(self.padding, public_key_pem, plaintext)?)
    }

    /// 非对称解密（原始字节密文）
    pub fn decrypt_asym(&self, private_key_pem: &str, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        Ok(rsa::decrypt(self.padding, private_key_pem, ciphertext)?)
    }

    /// 非对称解密（Base64 文本密文，例如经 JSON 传输的形式）
    pub fn decrypt_asym_base64(
        &self,
        private_key_pem: &str,
        ciphertext_base64: &str,
    ) -> Result<Vec<u8>, Error> {
        let ciphertext = from_base64(ciphertext_base64)
            .map_err(crate::asymmetric::errors::AsymmetricError::Base64)?;
        self.decrypt_asym(private_key_pem, &ciphertext)
    }

    /// 用私钥解包对称密钥。
    ///
    /// 校验解包结果恰好为 [`Self::SYM_KEY_SIZE`] 字节，并返回带类型
    /// 标记的 [`SymmetricKey`]。
    pub fn unwrap_key(
        &self,
        private_key_pem: &str,
        wrapped: &WrappedKey,
    ) -> Result<SymmetricKey, Error> {
        let mut key_bytes = rsa::decrypt(self.padding, private_key_pem, wrapped.as_bytes())?;
        let key = SymmetricKey::from_bytes(&key_bytes);
        key_bytes.zeroize();
        Ok(key?)
    }

    /// 对称加密一条字节流，返回完整信封。
    ///
    /// 每次调用生成全新的密钥和 IV（操作系统 CSPRNG），密钥在返回前
    /// 已用 `public_key_pem` 包装好。密文在读取 `data` 时才逐块产生，
    /// 不要求整个明文驻留内存。
    pub fn encrypt_sym<R: Read>(
        &self,
        public_key_pem: &str,
        source: R,
    ) -> Result<Envelope<R>, Error> {
        self.encrypt_sym_with_config(public_key_pem, source, &StreamingConfig::default())
    }

    /// 同 [`Self::encrypt_sym`]，但使用自定义的流式配置
    pub fn encrypt_sym_with_config<R: Read>(
        &self,
        public_key_pem: &str,
        source: R,
        config: &StreamingConfig,
    ) -> Result<Envelope<R>, Error> {
        let key = SymmetricKey::generate()?;
        let iv = generate_iv()?;
        let encrypted_key = WrappedKey(rsa::encrypt(self.padding, public_key_pem, key.as_bytes())?);
        let data = CipherStream::encrypt(self.algorithm, &key, &iv, source, config);
        Ok(Envelope {
            data,
            encrypted_key,
            iv,
        })
    }

    /// 对称加密一个文件（内部打开为流；文件句柄随密文流一起释放）
    pub fn encrypt_sym_file(
        &self,
        public_key_pem: &str,
        path: impl AsRef<Path>,
    ) -> Result<Envelope<File>, Error> {
        let file = File::open(path)?;
        self.encrypt_sym(public_key_pem, file)
    }

    /// 对称解密一条密文流。
    ///
    /// `key` 必须是已解包的对称密钥（见 [`Self::unwrap_key`]）；类型
    /// 系统保证无法误传仍被包装的密钥。`iv` 必须恰好 16 字节。CTR 模式
    /// 下错误的 IV 不会报错，只会得到等长的垃圾输出（没有完整性校验）；
    /// CBC 模式的填充校验可能在流末尾浮出解密错误。
    pub fn decrypt_sym<R: Read>(
        &self,
        key: &SymmetricKey,
        iv: &[u8],
        source: R,
    ) -> Result<CipherStream<R>, Error> {
        self.decrypt_sym_with_config(key, iv, source, &StreamingConfig::default())
    }

    /// 同 [`Self::decrypt_sym`]，但使用自定义的流式配置
    pub fn decrypt_sym_with_config<R: Read>(
        &self,
        key: &SymmetricKey,
        iv: &[u8],
        source: R,
        config: &StreamingConfig,
    ) -> Result<CipherStream<R>, Error> {
        let iv: [u8; IV_SIZE] = iv.try_into().map_err(|_| SymmetricError::InvalidIvSize {
            expected: IV_SIZE,
            actual: iv.len(),
        })?;
        Ok(CipherStream::decrypt(self.algorithm, key, &iv, source, config))
    }

    /// 同 [`Self::decrypt_sym`]，IV 以 Base64 字符串给出
    pub fn decrypt_sym_base64_iv<R: Read>(
        &self,
        key: &SymmetricKey,
        iv_base64: &str,
        source: R,
    ) -> Result<CipherStream<R>, Error> {
        let iv = from_base64(iv_base64).map_err(SymmetricError::Base64)?;
        self.decrypt_sym(key, &iv, source)
    }

    /// 对称解密一个文件（内部打开为流）
    pub fn decrypt_sym_file(
        &self,
        key: &SymmetricKey,
        iv: &[u8],
        path: impl AsRef<Path>,
    ) -> Result<CipherStream<File>, Error> {
        let file = File::open(path)?;
        self.decrypt_sym(key, iv, file)
    }
}
