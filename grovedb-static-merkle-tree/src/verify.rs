//! Proof verification.
//!
//! Pure functions: no tree state is needed, only the block, the proof and a
//! trusted root. The leaf hash is folded with each sibling through the
//! commutative combine, so the proof's path bits are never consulted.

use crate::{
    CostResult, CostsExt, Error, OperationCost, Result,
    block::{DataBlock, leaf_hash},
    cost_return_on_error, cost_return_on_error_no_add,
    hash::{Hash, MerkleHasher, combine},
    proof::Proof,
    tree::MerkleTree,
};

impl Proof {
    /// Fold the siblings over the block's leaf hash and return the resulting
    /// root.
    pub fn calculate_root<H: MerkleHasher, B: DataBlock + ?Sized>(
        &self,
        block: &B,
    ) -> CostResult<Hash, Error> {
        let mut cost = OperationCost::default();
        let mut running = cost_return_on_error!(&mut cost, leaf_hash::<H, B>(block));
        for sibling in &self.siblings {
            running = cost_return_on_error!(&mut cost, combine::<H>(&running, sibling));
        }
        Ok(running).wrap_with_cost(cost)
    }

    /// Check that `block` is committed to by `root`.
    pub fn verify<H: MerkleHasher, B: DataBlock + ?Sized>(
        &self,
        block: &B,
        root: &Hash,
    ) -> Result<bool> {
        verify::<H, B>(block, Some(self), root)
    }
}

/// Check that `block` is committed to by `root` through `proof`.
///
/// Returns `Ok(false)` for a well-formed proof that folds to a different
/// root, and [`Error::NilProof`] when no proof is given.
pub fn verify<H: MerkleHasher, B: DataBlock + ?Sized>(
    block: &B,
    proof: Option<&Proof>,
    root: &Hash,
) -> Result<bool> {
    verify_with_cost::<H, B>(block, proof, root).unwrap()
}

/// [`verify`] reporting one `hash_byte_calls` for the leaf and one
/// `hash_node_calls` per sibling.
pub fn verify_with_cost<H: MerkleHasher, B: DataBlock + ?Sized>(
    block: &B,
    proof: Option<&Proof>,
    root: &Hash,
) -> CostResult<bool, Error> {
    let mut cost = OperationCost::default();
    let proof = cost_return_on_error_no_add!(&cost, proof.ok_or(Error::NilProof));
    let computed = cost_return_on_error!(&mut cost, proof.calculate_root::<H, B>(block));
    Ok(&computed == root).wrap_with_cost(cost)
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Verify `block` and `proof` against this tree's root.
    pub fn verify<B: DataBlock + ?Sized>(&self, block: &B, proof: Option<&Proof>) -> Result<bool> {
        verify::<H, B>(block, proof, self.root())
    }
}
