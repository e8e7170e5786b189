//! Data blocks and leaf derivation.
//!
//! The tree never looks inside a block; it only hashes the bytes returned by
//! [`DataBlock::serialize`]. Serialization must be deterministic because leaf
//! hashes double as lookup keys for proofs.

use std::borrow::Cow;

use bincode::Encode;

use crate::{
    CostResult, CostsExt, Error, OperationCost, Result, cost_return_on_error,
    cost_return_on_error_no_add,
    hash::{Hash, MerkleHasher},
};

/// Anything that can be turned into bytes for hashing.
pub trait DataBlock {
    /// Serialize the block. Equal blocks must give equal bytes.
    fn serialize(&self) -> Result<Cow<'_, [u8]>>;
}

/// A block holding raw bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    data: Vec<u8>,
}

impl Block {
    /// Create a block from raw bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Block { data: data.into() }
    }

    /// The raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the block and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for Block {
    fn from(data: Vec<u8>) -> Self {
        Block { data }
    }
}

impl From<&[u8]> for Block {
    fn from(data: &[u8]) -> Self {
        Block {
            data: data.to_vec(),
        }
    }
}

impl From<&str> for Block {
    fn from(data: &str) -> Self {
        Block {
            data: data.as_bytes().to_vec(),
        }
    }
}

impl DataBlock for Block {
    fn serialize(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(&self.data))
    }
}

impl DataBlock for [u8] {
    fn serialize(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<const N: usize> DataBlock for [u8; N] {
    fn serialize(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl DataBlock for Vec<u8> {
    fn serialize(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl DataBlock for str {
    fn serialize(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl DataBlock for String {
    fn serialize(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl<T: DataBlock + ?Sized> DataBlock for &T {
    fn serialize(&self) -> Result<Cow<'_, [u8]>> {
        (**self).serialize()
    }
}

/// A block serialized with bincode (big-endian standard config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded<T>(pub T);

impl<T: Encode> DataBlock for Encoded<T> {
    fn serialize(&self) -> Result<Cow<'_, [u8]>> {
        let config = bincode::config::standard().with_big_endian();
        bincode::encode_to_vec(&self.0, config)
            .map(Cow::Owned)
            .map_err(|e| Error::Serialization(format!("bincode encode error: {}", e)))
    }
}

/// Hash one block into its leaf. Costs one `hash_byte_calls`.
pub fn leaf_hash<H: MerkleHasher, B: DataBlock + ?Sized>(block: &B) -> CostResult<Hash, Error> {
    let cost = OperationCost::default();
    let bytes = cost_return_on_error_no_add!(&cost, block.serialize());
    H::hash(&bytes).wrap_with_cost(OperationCost::with_hash_byte_calls(1))
}

/// Hash every block in input order.
///
/// Fails with [`Error::InvalidInput`] before hashing anything when fewer than
/// two blocks are given.
pub(crate) fn derive_leaves<H: MerkleHasher, B: DataBlock>(
    blocks: &[B],
) -> CostResult<Vec<Hash>, Error> {
    let mut cost = OperationCost::default();
    if blocks.len() < 2 {
        return Err(Error::InvalidInput {
            count: blocks.len(),
        })
        .wrap_with_cost(cost);
    }

    let mut leaves = Vec::with_capacity(blocks.len());
    for block in blocks {
        leaves.push(cost_return_on_error!(&mut cost, leaf_hash::<H, B>(block)));
    }
    Ok(leaves).wrap_with_cost(cost)
}
