//! AES-256-GCM implementation of [`AccountNumberCipher`].

use super::AccountNumberCipher;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;
use reimburse_config::SecurityConfig;
use reimburse_core::{ReimburseError, ReimburseResult};
use tracing::debug;

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Account number cipher using AES-256-GCM.
///
/// Stored form is base64 of `nonce || ciphertext`, a fresh random nonce per
/// encryption.
#[derive(Clone)]
pub struct AesGcmAccountCipher {
    cipher: Aes256Gcm,
}

impl AesGcmAccountCipher {
    /// Creates a cipher from raw key bytes.
    pub fn new(key: &[u8]) -> ReimburseResult<Self> {
        if key.len() != KEY_LEN {
            return Err(ReimburseError::Configuration(format!(
                "Account number key must be {} bytes, got {}",
                KEY_LEN,
                key.len()
            )));
        }
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| ReimburseError::Configuration(format!("Invalid key: {}", e)))?;
        Ok(Self { cipher })
    }

    /// Creates a cipher from a base64-encoded key.
    pub fn from_base64_key(key: &str) -> ReimburseResult<Self> {
        let bytes = general_purpose::STANDARD.decode(key.trim()).map_err(|e| {
            ReimburseError::Configuration(format!("Account number key is not base64: {}", e))
        })?;
        Self::new(&bytes)
    }

    /// Creates a cipher from the security configuration section.
    pub fn from_config(config: &SecurityConfig) -> ReimburseResult<Self> {
        let key = config.account_number_key.as_deref().ok_or_else(|| {
            ReimburseError::Configuration("security.account_number_key is not set".to_string())
        })?;
        Self::from_base64_key(key)
    }
}

impl AccountNumberCipher for AesGcmAccountCipher {
    fn encrypt(&self, plaintext: &str) -> ReimburseResult<String> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| ReimburseError::internal(format!("Encryption failed: {}", e)))?;

        let mut stored = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        stored.extend_from_slice(&nonce_bytes);
        stored.extend_from_slice(&ciphertext);
        Ok(general_purpose::STANDARD.encode(stored))
    }

    fn decrypt(&self, stored: &str) -> ReimburseResult<String> {
        let bytes = general_purpose::STANDARD
            .decode(stored.trim())
            .map_err(|e| ReimburseError::decryption(format!("Invalid base64: {}", e)))?;

        if bytes.len() <= NONCE_LEN {
            return Err(ReimburseError::decryption("Ciphertext too short"));
        }

        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| {
                debug!("Account number failed authentication");
                ReimburseError::decryption("Authentication tag mismatch")
            })?;

        String::from_utf8(plaintext)
            .map_err(|e| ReimburseError::decryption(format!("Plaintext is not UTF-8: {}", e)))
    }
}

impl std::fmt::Debug for AesGcmAccountCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmAccountCipher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> AesGcmAccountCipher {
        AesGcmAccountCipher::new(&[42u8; KEY_LEN]).unwrap()
    }

    #[test]
    fn test_decrypts_what_it_encrypts() {
        let cipher = cipher();
        let stored = cipher.encrypt("1234-5678-90").unwrap();
        assert_ne!(stored, "1234-5678-90");
        assert_eq!(cipher.decrypt(&stored).unwrap(), "1234-5678-90");
    }

    #[test]
    fn test_nonce_is_fresh_per_encryption() {
        let cipher = cipher();
        let a = cipher.encrypt("0011223344").unwrap();
        let b = cipher.encrypt("0011223344").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_is_decryption_error() {
        let stored = cipher().encrypt("0011223344").unwrap();
        let other = AesGcmAccountCipher::new(&[7u8; KEY_LEN]).unwrap();
        let err = other.decrypt(&stored).unwrap_err();
        assert!(matches!(err, ReimburseError::Decryption(_)));
    }

    #[test]
    fn test_tampered_ciphertext_rejected() {
        let cipher = cipher();
        let stored = cipher.encrypt("0011223344").unwrap();
        let mut bytes = general_purpose::STANDARD.decode(&stored).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = general_purpose::STANDARD.encode(bytes);
        assert!(matches!(
            cipher.decrypt(&tampered),
            Err(ReimburseError::Decryption(_))
        ));
    }

    #[test]
    fn test_garbage_input_rejected() {
        let cipher = cipher();
        assert!(matches!(
            cipher.decrypt("not base64!"),
            Err(ReimburseError::Decryption(_))
        ));
        assert!(matches!(
            cipher.decrypt(&general_purpose::STANDARD.encode([0u8; 4])),
            Err(ReimburseError::Decryption(_))
        ));
    }

    #[test]
    fn test_key_length_checked() {
        let err = AesGcmAccountCipher::new(&[1u8; 16]).unwrap_err();
        assert!(matches!(err, ReimburseError::Configuration(_)));
    }

    #[test]
    fn test_from_config() {
        let config = SecurityConfig {
            account_number_key: Some(general_purpose::STANDARD.encode([9u8; KEY_LEN])),
        };
        assert!(AesGcmAccountCipher::from_config(&config).is_ok());
        assert!(AesGcmAccountCipher::from_config(&SecurityConfig::default()).is_err());
    }
}
