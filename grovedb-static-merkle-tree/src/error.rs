use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from static Merkle tree operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Construction needs at least two blocks.
    #[error("invalid input: at least 2 blocks are required, got {count}")]
    InvalidInput {
        /// Number of blocks supplied.
        count: usize,
    },
    /// A block could not be turned into bytes.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The block's leaf hash is not part of the tree.
    #[error("block not found in merkle tree")]
    BlockNotFound,
    /// Verification was called without a proof.
    #[error("proof is missing")]
    NilProof,
    /// The hash primitive failed.
    #[error("hash function failed: {0}")]
    HashFailure(String),
    /// Proof bytes could not be encoded or decoded.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
