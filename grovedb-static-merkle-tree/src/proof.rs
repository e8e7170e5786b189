//! Inclusion proofs and their batched generation.
//!
//! Every proof is produced in one bottom-up sweep over the stored levels. At
//! level `s` a node spans `2^s` original leaves, so the two digests of a pair
//! are the sibling answer for every leaf under the other node of the pair.
//! Appending them range by range touches each stored node once instead of
//! walking from every leaf to the root.

use std::ops::Range;

use bincode::{Decode, Encode};

use crate::{Error, Result, hash::Hash};

/// Upper bound on decoded proof bytes.
const MAX_PROOF_BYTES: usize = 1024 * 1024;

/// An inclusion proof for one leaf.
///
/// `siblings` holds one digest per stored level, bottom-up. `path` has bit
/// `s` set when the leaf's ancestor at level `s` is the left node of its
/// pair. Verification folds only the siblings; the path is bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Proof {
    pub(crate) siblings: Vec<Hash>,
    pub(crate) path: u64,
}

impl Proof {
    /// Build a proof from its parts.
    pub fn new(siblings: Vec<Hash>, path: u64) -> Self {
        Proof { siblings, path }
    }

    /// Sibling digests, leaf level first.
    pub fn siblings(&self) -> &[Hash] {
        &self.siblings
    }

    /// The side bits recorded while generating the proof.
    pub fn path(&self) -> u64 {
        self.path
    }

    /// Number of siblings, equal to the depth of the tree that produced it.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// True for a proof with no siblings.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Consume the proof and return `(siblings, path)`.
    pub fn into_parts(self) -> (Vec<Hash>, u64) {
        (self.siblings, self.path)
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| Error::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode. Trailing bytes are rejected.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<MAX_PROOF_BYTES>();
        let (proof, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| Error::InvalidProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(Error::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        Ok(proof)
    }
}

/// Original leaf indexes spanned by `node` at a level where one node covers
/// `batch` leaves, clamped to the real leaf count.
fn leaf_span(node: usize, batch: usize, num_leaves: usize) -> Range<usize> {
    let start = (node * batch).min(num_leaves);
    let end = (node * batch + batch).min(num_leaves);
    start..end
}

/// Generate the proofs of all `num_leaves` leaves from the padded levels.
#[doc(hidden)]
pub fn generate_proofs(levels: &[Vec<Hash>], num_leaves: usize) -> Vec<Proof> {
    let mut proofs: Vec<Proof> = (0..num_leaves)
        .map(|_| Proof {
            siblings: Vec::with_capacity(levels.len()),
            path: 0,
        })
        .collect();

    for (step, level) in levels.iter().enumerate() {
        let batch = 1usize << step;
        for idx in (0..level.len()).step_by(2) {
            let (left, right) = (level[idx], level[idx + 1]);

            for proof in &mut proofs[leaf_span(idx, batch, num_leaves)] {
                proof.siblings.push(right);
                proof.path += 1 << step;
            }
            for proof in &mut proofs[leaf_span(idx + 1, batch, num_leaves)] {
                proof.siblings.push(left);
            }
        }
    }

    proofs
}
