//! 把密码变换挂接到字节流上的惰性流水线实现
use crate::common::streaming::StreamingConfig;
use crate::symmetric::cipher::{CipherAlgorithm, CipherTransform, IV_SIZE, SymmetricKey};
use std::io::{self, Read};

/// 惰性密码流：包装一个 [`Read`] 源，读取时按块把数据送过密码变换。
///
/// 本身也实现 [`Read`]，因此可以作为流水线阶段继续组合。单向、单次
/// 消费：块顺序端到端保持，消费完毕后再读恒返回 0。变换内部的失败
/// （例如 CBC 末块填充校验）以 [`io::Error`] 的形式在 `read` 调用中
/// 浮出，发生在恰好处理到触发它的密文时。
pub struct CipherStream<R> {
    source: R,
    transform: CipherTransform,
    buf: Vec<u8>,
    out: Vec<u8>,
    pos: usize,
    finalized: bool,
}

impl<R: Read> CipherStream<R> {
    /// 构造加密方向的流（明文进，密文出）
    pub fn encrypt(
        algorithm: CipherAlgorithm,
        key: &SymmetricKey,
        iv: &[u8; IV_SIZE],
        source: R,
        config: &StreamingConfig,
    ) -> Self {
        Self::new(CipherTransform::encryptor(algorithm, key, iv), source, config)
    }

    /// 构造解密方向的流（密文进，明文出）
    pub fn decrypt(
        algorithm: CipherAlgorithm,
        key: &SymmetricKey,
        iv: &[u8; IV_SIZE],
        source: R,
        config: &StreamingConfig,
    ) -> Self {
        Self::new(CipherTransform::decryptor(algorithm, key, iv), source, config)
    }

    fn new(transform: CipherTransform, source: R, config: &StreamingConfig) -> Self {
        Self {
            source,
            transform,
            buf: vec![0u8; config.buffer_size.max(1)],
            out: Vec::new(),
            pos: 0,
            finalized: false,
        }
    }
}

impl<R: Read> Read for CipherStream<R> {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }
        loop {
            // 先清空上一轮变换的剩余产出
            if self.pos < self.out.len() {
                let n = (self.out.len() - self.pos).min(dst.len());
                dst[..n].copy_from_slice(&self.out[self.pos..self.pos + n]);
                self.pos += n;
                return Ok(n);
            }
            if self.finalized {
                return Ok(0);
            }

            self.out.clear();
            self.pos = 0;
            let n = self.source.read(&mut self.buf)?;
            if n == 0 {
                self.transform
                    .finalize(&mut self.out)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                self.finalized = true;
            } else {
                self.transform.update(&self.buf[..n], &mut self.out);
            }
        }
    }
}
