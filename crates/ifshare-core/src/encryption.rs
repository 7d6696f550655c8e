//! Shared-secret encryption of uploaded content
//!
//! Every blob is sealed with AES-256-GCM under one deployment-wide key and a
//! fresh random nonce. The stored layout is `nonce (12 bytes) || ciphertext+tag`.

use crate::AppError;
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose, Engine as _};

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Ciphertext tagged with the media type declared for the plaintext.
#[derive(Debug, Clone)]
pub struct EncryptedBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl EncryptedBlob {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Clone)]
pub struct SharedSecretCipher {
    cipher: Aes256Gcm,
}

impl SharedSecretCipher {
    /// Build from raw 32-byte key material.
    pub fn from_key_bytes(key_bytes: &[u8]) -> Result<Self, AppError> {
        if key_bytes.len() != 32 {
            return Err(AppError::Encryption(
                "Encryption key must be 32 bytes (256 bits)".to_string(),
            ));
        }
        let key = Key::<Aes256Gcm>::from_slice(key_bytes);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    /// Build from the base64 form used by `ENCRYPTION_KEY`.
    pub fn from_base64_key(encoded: &str) -> Result<Self, AppError> {
        let key_bytes = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| AppError::Encryption(format!("Invalid base64 encryption key: {}", e)))?;
        Self::from_key_bytes(&key_bytes)
    }

    pub fn encrypt(&self, plaintext: &[u8], content_type: &str) -> Result<EncryptedBlob, AppError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| AppError::Encryption(format!("Encryption failed: {}", e)))?;

        let mut bytes = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        bytes.extend_from_slice(&nonce);
        bytes.extend_from_slice(&ciphertext);

        Ok(EncryptedBlob {
            bytes,
            content_type: content_type.to_string(),
        })
    }

    /// Fails on a wrong key or tampered bytes; never yields garbage plaintext.
    pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, AppError> {
        if sealed.len() < NONCE_LEN + TAG_LEN {
            return Err(AppError::Encryption(
                "Encrypted data too short".to_string(),
            ));
        }

        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| AppError::Encryption(format!("Decryption failed: {}", e)))
    }
}
