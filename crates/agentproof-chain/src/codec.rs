//! Textual encodings for signatures and keys
//!
//! The verifier takes its codec as a type parameter so the encoding of signatures
//! and public keys can change without touching verification logic.

use crate::CodecError;

/// Encoding between raw bytes and text
pub trait Codec {
    /// Encode bytes as text
    fn encode(&self, bytes: &[u8]) -> String;

    /// Decode text into bytes
    fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError>;
}

/// Bitcoin-alphabet base58, as used by Solana wallets for keys and signatures
#[derive(Debug, Clone, Copy, Default)]
pub struct Base58Codec;

impl Codec for Base58Codec {
    fn encode(&self, bytes: &[u8]) -> String {
        bs58::encode(bytes).into_string()
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        bs58::decode(text.trim())
            .into_vec()
            .map_err(|e| CodecError::Decode {
                encoding: "base58",
                message: e.to_string(),
            })
    }
}

/// Lowercase hexadecimal
#[derive(Debug, Clone, Copy, Default)]
pub struct HexCodec;

impl Codec for HexCodec {
    fn encode(&self, bytes: &[u8]) -> String {
        hex::encode(bytes)
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        hex::decode(text.trim()).map_err(|e| CodecError::Decode {
            encoding: "hex",
            message: e.to_string(),
        })
    }
}
