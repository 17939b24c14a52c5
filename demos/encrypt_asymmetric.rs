//! 非对称加解密示例
//!
//! 运行: `cargo run --example encrypt_asymmetric`

use envelope_kit::{CryptoConfig, EncryptionEngine, generate_keypair};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (public_pem, private_pem) = generate_keypair(&CryptoConfig::default())?;
    let engine = EncryptionEngine::aes_256_ctr();

    let data_to_encrypt = "This is a secret message";
    let encrypted = engine.encrypt_asym(&public_pem, data_to_encrypt.as_bytes())?;
    println!("Encrypted ({} bytes): {}", encrypted.len(), envelope_kit::common::to_base64(&encrypted));

    let decrypted = engine.decrypt_asym(&private_pem, &encrypted)?;
    println!("Decrypted: {}", String::from_utf8(decrypted)?);

    Ok(())
}
