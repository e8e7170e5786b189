//! Immutable binary Merkle tree with batched inclusion proofs.
//!
//! A [`MerkleTree`] is built once from an ordered set of at least two
//! [`DataBlock`]s. Each block is serialized and hashed into a leaf; levels
//! are built bottom-up by combining adjacent pairs with
//! `H(min(a, b) || max(a, b))`, duplicating the last digest of any
//! odd-length level. The final two-digest level is combined into the root.
//!
//! Proofs for every leaf are produced in one sweep over the stored levels
//! (see [`Proof`]) and verified with [`verify`], which needs only the block,
//! the proof and a trusted root.
//!
//! # Core types
//!
//! - [`MerkleTree`] — construction, root, proof lookup.
//! - [`Proof`] — sibling digests for one leaf (bincode encodable).
//! - [`DataBlock`] — serialization capability of the caller's blocks.
//! - [`MerkleHasher`] — pluggable 32-byte digest ([`Sha256Hasher`] by
//!   default, `Blake3Hasher` with the `blake3` feature).
//! - [`OperationCost`] / [`CostResult`] — hash call accounting.

#![warn(missing_docs)]

mod block;
mod cost;
mod error;
pub(crate) mod hash;
pub(crate) mod proof;
pub(crate) mod tree;
mod verify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use block::{Block, DataBlock, Encoded, leaf_hash};
pub use cost::{CostContext, CostResult, CostsExt, OperationCost};
pub use error::{Error, Result};
#[cfg(feature = "blake3")]
pub use hash::Blake3Hasher;
pub use hash::{HASH_LENGTH, Hash, MerkleHasher, Sha256Hasher, combine, sorted_concat};
pub use proof::Proof;
#[doc(hidden)]
pub use proof::generate_proofs;
pub use tree::{MerkleTree, tree_depth};
pub use verify::{verify, verify_with_cost};
