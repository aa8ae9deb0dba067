//! Account number encryption.

mod aes;

pub use aes::AesGcmAccountCipher;

use reimburse_core::ReimburseResult;

/// Reversible encryption of bank account numbers.
///
/// Implementations must be safe to share between repository tasks.
pub trait AccountNumberCipher: Send + Sync {
    /// Encrypts a plaintext account number into its stored form.
    fn encrypt(&self, plaintext: &str) -> ReimburseResult<String>;

    /// Decrypts a stored account number.
    ///
    /// Fails with [`reimburse_core::ReimburseError::Decryption`] on malformed
    /// or tampered input.
    fn decrypt(&self, stored: &str) -> ReimburseResult<String>;
}
