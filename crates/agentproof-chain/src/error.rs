//! Error types for key handling and encodings

use thiserror::Error;

/// Errors decoding a textual encoding into bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input is not valid in the codec's alphabet
    #[error("Invalid {encoding} encoding: {message}")]
    Decode {
        /// Name of the encoding (e.g. "base58")
        encoding: &'static str,
        /// Underlying decoder message
        message: String,
    },
}

/// Errors loading or using signing keys
#[derive(Error, Debug)]
pub enum KeyError {
    /// Seed could not be decoded as hex or base58
    #[error("Invalid key encoding: {0}")]
    Encoding(String),

    /// Decoded key material has the wrong length
    #[error("Invalid key length: expected 32 or 64 bytes, got {0}")]
    Length(usize),

    /// Root hash handed to the signer is not hex
    #[error("Invalid root hash: {0}")]
    RootHash(String),
}
