//! Agent-side signing of chain roots

use crate::codec::{Base58Codec, Codec, HexCodec};
use crate::hashing::chain_root_digest;
use crate::KeyError;
use agentproof_domain::{LogEntry, ProofPackage};
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;

/// Signs chain roots with the agent's Ed25519 key
pub struct ProofSigner {
    signing_key: SigningKey,
}

impl ProofSigner {
    /// Create a signer from a 32-byte secret seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Load a signer from text
    ///
    /// Accepts a 64-character hex seed, a base58 32-byte seed, or a base58 64-byte
    /// wallet keypair (secret seed followed by public key).
    pub fn from_seed_str(text: &str) -> Result<Self, KeyError> {
        let text = text.trim();
        let bytes = if text.len() == 64 && text.chars().all(|c| c.is_ascii_hexdigit()) {
            HexCodec.decode(text)
        } else {
            Base58Codec.decode(text)
        }
        .map_err(|e| KeyError::Encoding(e.to_string()))?;

        match bytes.len() {
            32 | 64 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(&bytes[..32]);
                Ok(Self::from_seed(&seed))
            }
            other => Err(KeyError::Length(other)),
        }
    }

    /// Generate a fresh random key
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Secret seed as hex, for storing in configuration
    pub fn seed_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// Public key in base58
    pub fn public_key(&self) -> String {
        Base58Codec.encode(self.signing_key.verifying_key().as_bytes())
    }

    /// Sign the raw bytes of a hex root hash, returning a base58 signature
    pub fn sign_root(&self, root_hash: &str) -> Result<String, KeyError> {
        let message = hex::decode(root_hash).map_err(|e| KeyError::RootHash(e.to_string()))?;
        Ok(self.sign_bytes(&message))
    }

    fn sign_bytes(&self, message: &[u8]) -> String {
        let signature = self.signing_key.sign(message);
        Base58Codec.encode(&signature.to_bytes())
    }

    /// Assemble a signed proof package from the given entries
    pub fn build_package(&self, logs: Vec<LogEntry>) -> ProofPackage {
        let digest = chain_root_digest(&logs);
        let signature = self.sign_bytes(&digest);
        ProofPackage::signed(logs, hex::encode(digest), signature, self.public_key())
    }
}

impl std::fmt::Debug for ProofSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofSigner")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}
