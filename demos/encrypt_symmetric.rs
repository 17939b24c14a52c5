//! 对称流式信封加密示例
//!
//! 运行: `cargo run --example encrypt_symmetric`

use envelope_kit::{CryptoConfig, EncryptionEngine, generate_keypair};
use std::io::{Cursor, Read};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (public_pem, private_pem) = generate_keypair(&CryptoConfig::default())?;
    let engine = EncryptionEngine::aes_256_ctr_oaep();

    // 1. 加密：得到 {密文流, 包装后的密钥, IV} 三件套
    let payload = (0u8..100).collect::<Vec<u8>>();
    let mut envelope = engine.encrypt_sym(&public_pem, Cursor::new(payload.clone()))?;

    let mut ciphertext = Vec::new();
    envelope.data.read_to_end(&mut ciphertext)?;
    println!("Ciphertext: {} bytes", ciphertext.len());
    println!("Wrapped key: {}", envelope.encrypted_key.to_base64());
    println!("IV: {}", envelope_kit::common::to_base64(&envelope.iv));

    // 2. 解密：先用私钥解包对称密钥，再喂入密钥 + IV + 密文流
    let key = engine.unwrap_key(&private_pem, &envelope.encrypted_key)?;
    let mut decrypted = Vec::new();
    engine
        .decrypt_sym(&key, &envelope.iv, Cursor::new(ciphertext))?
        .read_to_end(&mut decrypted)?;

    assert_eq!(decrypted, payload);
    println!("Envelope roundtrip successful: {} bytes recovered.", decrypted.len());

    Ok(())
}
