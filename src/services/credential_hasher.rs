use argon2::password_hash::Output;
use argon2::{Algorithm, Argon2, Params, Version};
use rand_core::{OsRng, RngCore};
use std::fmt;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;

const SALT_BYTES: usize = 16;
const DIGEST_BYTES: usize = 32;
const SEPARATOR: char = ':';

/// Produces and checks stored credential digests
///
/// A digest has the form `salt:hashHex`. The salt is 16 bytes from the OS
/// CSPRNG (hex encoded) and the hash is Argon2id over the password, keyed
/// with the process-wide pepper.
pub struct CredentialHasher {
    pepper: String,
    params: Params,
}

impl CredentialHasher {
    /// Create a hasher with the default Argon2 cost parameters
    pub fn new(pepper: String) -> Self {
        Self::with_params(pepper, Params::default())
    }

    /// Create a hasher with explicit Argon2 cost parameters
    pub fn with_params(pepper: String, params: Params) -> Self {
        Self { pepper, params }
    }

    /// Hash a plaintext password into a storable `salt:hashHex` digest
    ///
    /// Every call draws a fresh salt, so hashing the same password twice
    /// yields different digests.
    pub fn hash(&self, plaintext: &str) -> Result<String, InternalError> {
        let mut salt_bytes = [0u8; SALT_BYTES];
        OsRng.fill_bytes(&mut salt_bytes);
        let salt = hex::encode(salt_bytes);

        let hash = self.derive(&salt, plaintext)?;

        Ok(format!("{}{}{}", salt, SEPARATOR, hex::encode(hash)))
    }

    /// Check a plaintext password against a stored digest
    ///
    /// Malformed digests (no separator, bad hex, unusable salt) never
    /// match; this function does not fail loudly.
    pub fn verify(&self, digest: &str, plaintext: &str) -> bool {
        let Some((salt, stored_hex)) = digest.split_once(SEPARATOR) else {
            return false;
        };

        let Ok(stored_bytes) = hex::decode(stored_hex) else {
            return false;
        };
        let Ok(stored) = Output::new(&stored_bytes) else {
            return false;
        };

        let Ok(computed_bytes) = self.derive(salt, plaintext) else {
            return false;
        };
        let Ok(computed) = Output::new(&computed_bytes) else {
            return false;
        };

        // Output equality is constant-time
        stored == computed
    }

    fn derive(&self, salt: &str, plaintext: &str) -> Result<[u8; DIGEST_BYTES], CredentialError> {
        let argon2 = Argon2::new_with_secret(
            self.pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
        .map_err(|e| CredentialError::HashingFailed(format!("Failed to initialize Argon2: {}", e)))?;

        let mut output = [0u8; DIGEST_BYTES];
        argon2
            .hash_password_into(plaintext.as_bytes(), salt.as_bytes(), &mut output)
            .map_err(|e| CredentialError::HashingFailed(e.to_string()))?;

        Ok(output)
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("pepper", &"<redacted>")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .finish()
    }
}
