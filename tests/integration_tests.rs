//!
//! 集成测试
//!
//! 端到端验证信封加密的完整流程：四种引擎配置下的非对称包装、
//! 流式对称加解密、文件路径输入，以及各种错配场景的失败方式。
//!

use envelope_kit::{
    CipherStream, CryptoConfig, EncryptionEngine, Error, StreamingConfig, SymmetricError,
    SymmetricKey, generate_keypair,
};
use std::io::{Cursor, Read, Write};
use tempfile::tempdir;

// 辅助函数：小密钥让端到端测试保持快速
fn setup_keys() -> (String, String) {
    generate_keypair(&CryptoConfig { rsa_key_bits: 1024 }).unwrap()
}

fn all_engines() -> [EncryptionEngine; 4] {
    [
        EncryptionEngine::aes_256_ctr(),
        EncryptionEngine::aes_256_ctr_oaep(),
        EncryptionEngine::aes_256_cbc(),
        EncryptionEngine::aes_256_cbc_oaep(),
    ]
}

fn drain(mut stream: CipherStream<impl Read>) -> Vec<u8> {
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).unwrap();
    buf
}

// === 非对称包装 ===

#[test]
fn test_asym_roundtrip_all_configurations() {
    let (public_pem, private_pem) = setup_keys();
    let message = b"This is a super secret message...";

    for engine in all_engines() {
        let ciphertext = engine.encrypt_asym(&public_pem, message).unwrap();
        let decrypted = engine.decrypt_asym(&private_pem, &ciphertext).unwrap();
        assert_eq!(decrypted, message);
    }
}

#[test]
fn test_asym_decrypt_independent_of_cipher_mode_label() {
    let (public_pem, private_pem) = setup_keys();
    let message = b"This is a super secret message...";

    // CTR 加密、CBC 解密（同为 PKCS#1 填充），两个方向都要成立
    let ciphertext = EncryptionEngine::aes_256_ctr()
        .encrypt_asym(&public_pem, message)
        .unwrap();
    let decrypted = EncryptionEngine::aes_256_cbc()
        .decrypt_asym(&private_pem, &ciphertext)
        .unwrap();
    assert_eq!(decrypted, message);

    let ciphertext = EncryptionEngine::aes_256_cbc_oaep()
        .encrypt_asym(&public_pem, message)
        .unwrap();
    let decrypted = EncryptionEngine::aes_256_ctr_oaep()
        .decrypt_asym(&private_pem, &ciphertext)
        .unwrap();
    assert_eq!(decrypted, message);
}

#[test]
fn test_asym_padding_scheme_mismatch_fails() {
    let (public_pem, private_pem) = setup_keys();
    let message = b"not interchangeable";

    let oaep = EncryptionEngine::aes_256_ctr_oaep()
        .encrypt_asym(&public_pem, message)
        .unwrap();
    assert!(
        EncryptionEngine::aes_256_ctr()
            .decrypt_asym(&private_pem, &oaep)
            .is_err()
    );

    let pkcs1 = EncryptionEngine::aes_256_ctr()
        .encrypt_asym(&public_pem, message)
        .unwrap();
    assert!(
        EncryptionEngine::aes_256_ctr_oaep()
            .decrypt_asym(&private_pem, &pkcs1)
            .is_err()
    );
}

#[test]
fn test_asym_encryption_is_nondeterministic() {
    let (public_pem, _) = setup_keys();
    let engine = EncryptionEngine::aes_256_ctr();
    let message = b"This is a super secret message...";

    let c1 = engine.encrypt_asym(&public_pem, message).unwrap();
    let c2 = engine.encrypt_asym(&public_pem, message).unwrap();
    let c3 = engine.encrypt_asym(&public_pem, message).unwrap();

    assert_ne!(c1, c2);
    assert_ne!(c1, c3);
    assert_ne!(c2, c3);
}

#[test]
fn test_asym_wrong_private_key_fails() {
    let (public_pem, _) = setup_keys();
    let (_, unrelated_private_pem) = setup_keys();
    let engine = EncryptionEngine::aes_256_cbc_oaep();

    let ciphertext = engine.encrypt_asym(&public_pem, b"secret").unwrap();
    assert!(
        engine
            .decrypt_asym(&unrelated_private_pem, &ciphertext)
            .is_err()
    );
}

#[test]
fn test_asym_invalid_keys_fail() {
    let (public_pem, private_pem) = setup_keys();
    let engine = EncryptionEngine::aes_256_ctr();

    assert!(
        engine
            .encrypt_asym(&public_pem.replace('-', "."), b"data")
            .is_err()
    );

    let ciphertext = engine.encrypt_asym(&public_pem, b"data").unwrap();
    assert!(
        engine
            .decrypt_asym(&private_pem.replace('-', "."), &ciphertext)
            .is_err()
    );
}

// === 对称流式加解密 ===

#[test]
fn test_sym_stream_roundtrip_all_sizes_and_configurations() {
    let (public_pem, private_pem) = setup_keys();

    for engine in all_engines() {
        for size in [0usize, 1, 4096, 1_000_000] {
            let plaintext: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();

            let mut envelope = engine
                .encrypt_sym(&public_pem, Cursor::new(plaintext.clone()))
                .unwrap();
            let mut ciphertext = Vec::new();
            envelope.data.read_to_end(&mut ciphertext).unwrap();

            let key = engine
                .unwrap_key(&private_pem, &envelope.encrypted_key)
                .unwrap();
            let decrypted = drain(
                engine
                    .decrypt_sym(&key, &envelope.iv, Cursor::new(ciphertext))
                    .unwrap(),
            );

            assert_eq!(decrypted, plaintext, "size {size} failed");
        }
    }
}

#[test]
fn test_sym_envelope_fields_are_complete() {
    let (public_pem, _) = setup_keys();
    let engine = EncryptionEngine::aes_256_ctr();

    let envelope = engine
        .encrypt_sym(&public_pem, Cursor::new(b"Some data".to_vec()))
        .unwrap();

    assert_eq!(envelope.iv.len(), EncryptionEngine::IV_SIZE);
    // 包装后的密钥长度等于 RSA 模数长度
    assert_eq!(envelope.encrypted_key.as_bytes().len(), 128);
}

#[test]
fn test_sym_tampered_iv_yields_garbage_not_error_for_ctr() {
    let (public_pem, private_pem) = setup_keys();
    let engine = EncryptionEngine::aes_256_ctr();
    let plaintext = b"Some data to be encrypted symmetrically".to_vec();

    let mut envelope = engine
        .encrypt_sym(&public_pem, Cursor::new(plaintext.clone()))
        .unwrap();
    let mut ciphertext = Vec::new();
    envelope.data.read_to_end(&mut ciphertext).unwrap();

    let key = engine
        .unwrap_key(&private_pem, &envelope.encrypted_key)
        .unwrap();
    let mut tampered_iv = envelope.iv;
    tampered_iv[0] ^= 0x01; // 单比特翻转

    let garbage = drain(
        engine
            .decrypt_sym(&key, &tampered_iv, Cursor::new(ciphertext))
            .unwrap(),
    );

    assert_eq!(garbage.len(), plaintext.len());
    assert_ne!(garbage, plaintext);
}

#[test]
fn test_sym_decrypt_requires_unwrapped_key() {
    let (public_pem, _) = setup_keys();
    let engine = EncryptionEngine::aes_256_ctr();

    let envelope = engine
        .encrypt_sym(&public_pem, Cursor::new(b"data".to_vec()))
        .unwrap();

    // 仍被包装的密钥字节不可能构造出合法的对称密钥
    let result = SymmetricKey::from_bytes(envelope.encrypted_key.as_bytes());
    assert!(matches!(
        result,
        Err(SymmetricError::InvalidKeySize { expected: 32, .. })
    ));
}

#[test]
fn test_sym_wrong_key_for_ctr_yields_garbage_of_correct_length() {
    let (public_pem, _) = setup_keys();
    let engine = EncryptionEngine::aes_256_ctr();
    let plaintext = b"counter mode silently decrypts to noise".to_vec();

    let mut envelope = engine
        .encrypt_sym(&public_pem, Cursor::new(plaintext.clone()))
        .unwrap();
    let mut ciphertext = Vec::new();
    envelope.data.read_to_end(&mut ciphertext).unwrap();

    let unrelated_key = SymmetricKey::generate().unwrap();
    let garbage = drain(
        engine
            .decrypt_sym(&unrelated_key, &envelope.iv, Cursor::new(ciphertext))
            .unwrap(),
    );

    // CTR 没有完整性校验：合约是“等长垃圾”，不是异常
    assert_eq!(garbage.len(), plaintext.len());
    assert_ne!(garbage, plaintext);
}

#[test]
fn test_sym_stream_is_lazy_and_single_pass() {
    let (public_pem, private_pem) = setup_keys();
    let engine = EncryptionEngine::aes_256_cbc_oaep();
    let plaintext = vec![0x5Au8; 10_000];

    let mut envelope = engine
        .encrypt_sym_with_config(
            &public_pem,
            Cursor::new(plaintext.clone()),
            &StreamingConfig::default().with_buffer_size(512),
        )
        .unwrap();

    // 分多次读取，模拟下游一边消费一边产生
    let mut ciphertext = Vec::new();
    let mut chunk = [0u8; 300];
    loop {
        let n = envelope.data.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        ciphertext.extend_from_slice(&chunk[..n]);
    }

    let key = engine
        .unwrap_key(&private_pem, &envelope.encrypted_key)
        .unwrap();
    let decrypted = drain(
        engine
            .decrypt_sym(&key, &envelope.iv, Cursor::new(ciphertext))
            .unwrap(),
    );
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_cross_engine_unwrap_with_matching_padding() {
    let (public_pem, private_pem) = setup_keys();
    let plaintext = b"wrapped by one engine, unwrapped by another".to_vec();

    // CTR 引擎加密，CBC 引擎解包密钥（同为 PKCS#1），再由 CTR 引擎解密数据
    let ctr = EncryptionEngine::aes_256_ctr();
    let cbc = EncryptionEngine::aes_256_cbc();

    let mut envelope = ctr
        .encrypt_sym(&public_pem, Cursor::new(plaintext.clone()))
        .unwrap();
    let mut ciphertext = Vec::new();
    envelope.data.read_to_end(&mut ciphertext).unwrap();

    let key = cbc
        .unwrap_key(&private_pem, &envelope.encrypted_key)
        .unwrap();
    let decrypted = drain(
        ctr.decrypt_sym(&key, &envelope.iv, Cursor::new(ciphertext))
            .unwrap(),
    );

    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_unwrap_with_mismatched_padding_fails() {
    let (public_pem, private_pem) = setup_keys();
    let engine = EncryptionEngine::aes_256_ctr_oaep();

    let envelope = engine
        .encrypt_sym(&public_pem, Cursor::new(Vec::new()))
        .unwrap();
    let result =
        EncryptionEngine::aes_256_ctr().unwrap_key(&private_pem, &envelope.encrypted_key);
    assert!(matches!(result, Err(Error::Asymmetric(_))));
}

// === 文件路径输入 ===

#[test]
fn test_file_roundtrip() {
    let (public_pem, private_pem) = setup_keys();
    let engine = EncryptionEngine::aes_256_cbc();
    let dir = tempdir().unwrap();

    let original: Vec<u8> = (0..100_000).map(|i| (i % 239) as u8).collect();
    let original_path = dir.path().join("original.bin");
    std::fs::write(&original_path, &original).unwrap();

    // 加密到文件
    let mut envelope = engine.encrypt_sym_file(&public_pem, &original_path).unwrap();
    let encrypted_path = dir.path().join("encrypted.bin");
    let mut encrypted_file = std::fs::File::create(&encrypted_path).unwrap();
    let mut ciphertext = Vec::new();
    envelope.data.read_to_end(&mut ciphertext).unwrap();
    encrypted_file.write_all(&ciphertext).unwrap();
    drop(encrypted_file);

    // 解包密钥并从文件解密
    let key = engine
        .unwrap_key(&private_pem, &envelope.encrypted_key)
        .unwrap();
    let decrypted = drain(
        engine
            .decrypt_sym_file(&key, &envelope.iv, &encrypted_path)
            .unwrap(),
    );

    assert_eq!(decrypted, original);
}

#[test]
fn test_missing_file_surfaces_io_error() {
    let (public_pem, _) = setup_keys();
    let engine = EncryptionEngine::aes_256_ctr();

    let result = engine.encrypt_sym_file(&public_pem, "/definitely/not/a/real/path");
    assert!(matches!(result, Err(Error::Io(_))));
}
