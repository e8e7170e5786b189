//! Hash primitives and the sorted-concatenation combine.
//!
//! Parent digests are `H(min(a, b) || max(a, b))` with `min`/`max` taken by
//! byte-lexicographic order, so the combine is commutative and a proof does
//! not need to record which side each sibling sits on.

use sha2::{Digest, Sha256};

use crate::{CostResult, CostsExt, OperationCost, Result};

/// Length in bytes of every digest in the tree.
pub const HASH_LENGTH: usize = 32;

/// A 32-byte digest: a leaf, an inner node, or the root.
pub type Hash = [u8; HASH_LENGTH];

/// A pluggable 32-byte digest function.
///
/// Implementations must be deterministic. Failures surface as
/// [`Error::HashFailure`](crate::Error::HashFailure) and abort the running
/// operation.
pub trait MerkleHasher {
    /// Hash `data` into a 32-byte digest.
    fn hash(data: &[u8]) -> Result<Hash>;
}

/// SHA-256 hasher (the default).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sha256Hasher;

impl MerkleHasher for Sha256Hasher {
    fn hash(data: &[u8]) -> Result<Hash> {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Ok(hasher.finalize().into())
    }
}

/// Blake3 hasher.
#[cfg(feature = "blake3")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Blake3Hasher;

#[cfg(feature = "blake3")]
impl MerkleHasher for Blake3Hasher {
    fn hash(data: &[u8]) -> Result<Hash> {
        Ok(*blake3::hash(data).as_bytes())
    }
}

/// Concatenate two digests smallest first.
pub fn sorted_concat(a: &Hash, b: &Hash) -> [u8; 2 * HASH_LENGTH] {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut input = [0u8; 2 * HASH_LENGTH];
    input[..HASH_LENGTH].copy_from_slice(first);
    input[HASH_LENGTH..].copy_from_slice(second);
    input
}

/// Combine two digests into their parent: `H(sorted_concat(a, b))`.
///
/// Costs one `hash_node_calls`.
pub fn combine<H: MerkleHasher>(a: &Hash, b: &Hash) -> CostResult<Hash, crate::Error> {
    H::hash(&sorted_concat(a, b)).wrap_with_cost(OperationCost::with_hash_node_calls(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_concat_puts_smaller_first() {
        let low = [1u8; HASH_LENGTH];
        let high = [2u8; HASH_LENGTH];
        let joined = sorted_concat(&high, &low);
        assert_eq!(&joined[..HASH_LENGTH], &low);
        assert_eq!(&joined[HASH_LENGTH..], &high);
        assert_eq!(joined, sorted_concat(&low, &high));
    }

    #[test]
    fn test_sorted_concat_compares_lexicographically() {
        let mut a = [0u8; HASH_LENGTH];
        let mut b = [0u8; HASH_LENGTH];
        // the first differing byte decides, so b sorts first
        a[0] = 1;
        b[31] = 0xff;
        let joined = sorted_concat(&a, &b);
        assert_eq!(&joined[..HASH_LENGTH], &b);
    }

    #[test]
    fn test_combine_is_commutative() {
        let a = Sha256Hasher::hash(b"left").expect("hash left");
        let b = Sha256Hasher::hash(b"right").expect("hash right");
        let ab = combine::<Sha256Hasher>(&a, &b);
        let ba = combine::<Sha256Hasher>(&b, &a);
        assert_eq!(ab.cost, OperationCost::with_hash_node_calls(1));
        assert_eq!(
            ab.value.expect("combine ab"),
            ba.value.expect("combine ba")
        );
    }

    #[test]
    fn test_sha256_known_vector() {
        let digest = Sha256Hasher::hash(b"abc").expect("hash abc");
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[cfg(feature = "blake3")]
    #[test]
    fn test_blake3_differs_from_sha256() {
        let sha = Sha256Hasher::hash(b"abc").expect("sha256");
        let b3 = Blake3Hasher::hash(b"abc").expect("blake3");
        assert_ne!(sha, b3);
        assert_eq!(b3, *blake3::hash(b"abc").as_bytes());
    }
}
