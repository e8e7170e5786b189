use std::{collections::HashMap, marker::PhantomData};

use log::{debug, trace};

use crate::{
    CostResult, CostsExt, Error, OperationCost, Result,
    block::{DataBlock, derive_leaves, leaf_hash},
    cost_return_on_error,
    hash::{Hash, MerkleHasher, Sha256Hasher, combine},
    proof::{Proof, generate_proofs},
};

/// Number of ceiling-halving steps (`n = ceil(n / 2)`) that bring
/// `leaf_count` down to 1. This is also the number of stored levels and the
/// length of every proof.
pub fn tree_depth(leaf_count: usize) -> u32 {
    let mut n = leaf_count;
    let mut depth = 0;
    while n > 1 {
        n = n.div_ceil(2);
        depth += 1;
    }
    depth
}

/// Duplicate the last digest of an odd-length level.
fn pad_odd(level: &mut Vec<Hash>) {
    if level.len() % 2 == 1 {
        let last = level[level.len() - 1];
        level.push(last);
    }
}

/// An immutable binary Merkle tree over an ordered set of blocks.
///
/// Levels are stored bottom-up as contiguous vectors; the parent of node `i`
/// is node `i / 2` one level up. Level 0 holds the leaves padded to even
/// length, and the last stored level always holds exactly two digests whose
/// combine is the root. Proofs for every leaf are generated once at build
/// time.
#[derive(Debug, Clone)]
pub struct MerkleTree<H = Sha256Hasher> {
    levels: Vec<Vec<Hash>>,
    root: Hash,
    leaves: Vec<Hash>,
    proofs: Vec<Proof>,
    leaf_map: HashMap<Hash, usize>,
    depth: u32,
    _hasher: PhantomData<fn() -> H>,
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Build a tree from `blocks`, discarding the hashing cost.
    pub fn new<B: DataBlock>(blocks: &[B]) -> Result<Self> {
        Self::build(blocks).unwrap()
    }

    /// Build a tree from `blocks`.
    ///
    /// Requires at least two blocks. Reports one `hash_byte_calls` per block
    /// and one `hash_node_calls` per combined pair, root included.
    pub fn build<B: DataBlock>(blocks: &[B]) -> CostResult<Self, Error> {
        let mut cost = OperationCost::default();

        let leaves = cost_return_on_error!(&mut cost, derive_leaves::<H, B>(blocks));
        let depth = tree_depth(leaves.len());
        let (levels, root) = cost_return_on_error!(&mut cost, Self::build_levels(&leaves, depth));
        let proofs = generate_proofs(&levels, leaves.len());

        // later duplicates win, matching the proof a lookup hands out
        let leaf_map = leaves
            .iter()
            .enumerate()
            .map(|(index, leaf)| (*leaf, index))
            .collect();

        debug!(
            "built merkle tree: leaves={}, depth={}, root={}, byte_hashes={}, node_hashes={}",
            leaves.len(),
            depth,
            hex::encode(root),
            cost.hash_byte_calls,
            cost.hash_node_calls
        );

        Ok(MerkleTree {
            levels,
            root,
            leaves,
            proofs,
            leaf_map,
            depth,
            _hasher: PhantomData,
        })
        .wrap_with_cost(cost)
    }

    /// Hash level after level up to the two-node top, then combine the top
    /// pair into the root.
    fn build_levels(leaves: &[Hash], depth: u32) -> CostResult<(Vec<Vec<Hash>>, Hash), Error> {
        let mut cost = OperationCost::default();
        let mut levels: Vec<Vec<Hash>> = Vec::with_capacity(depth as usize);

        let mut level = leaves.to_vec();
        pad_odd(&mut level);
        levels.push(level);

        for i in 0..depth as usize - 1 {
            let mut parents = Vec::with_capacity(levels[i].len() / 2 + 1);
            for pair in levels[i].chunks_exact(2) {
                parents.push(cost_return_on_error!(
                    &mut cost,
                    combine::<H>(&pair[0], &pair[1])
                ));
            }
            pad_odd(&mut parents);
            trace!("level {} holds {} nodes", i + 1, parents.len());
            levels.push(parents);
        }

        let top = &levels[depth as usize - 1];
        let root = cost_return_on_error!(&mut cost, combine::<H>(&top[0], &top[1]));
        Ok((levels, root)).wrap_with_cost(cost)
    }

    /// Index of the block's leaf in input order.
    pub fn index_of<B: DataBlock + ?Sized>(&self, block: &B) -> Result<usize> {
        let leaf = leaf_hash::<H, B>(block).unwrap()?;
        self.leaf_map
            .get(&leaf)
            .copied()
            .ok_or(Error::BlockNotFound)
    }

    /// The precomputed proof for `block`.
    pub fn proof<B: DataBlock + ?Sized>(&self, block: &B) -> Result<Proof> {
        let index = self.index_of(block)?;
        Ok(self.proofs[index].clone())
    }

    /// True when the block's leaf is part of the tree.
    pub fn contains<B: DataBlock + ?Sized>(&self, block: &B) -> Result<bool> {
        match self.index_of(block) {
            Ok(_) => Ok(true),
            Err(Error::BlockNotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<H> MerkleTree<H> {
    /// The root digest committing to every block.
    pub fn root(&self) -> &Hash {
        &self.root
    }

    /// Number of stored levels, equal to the length of every proof.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of blocks the tree was built from.
    pub fn num_leaves(&self) -> usize {
        self.leaves.len()
    }

    /// Leaf digests in input order, without padding.
    pub fn leaves(&self) -> &[Hash] {
        &self.leaves
    }

    /// All stored levels, leaf level first, each padded to even length.
    pub fn levels(&self) -> &[Vec<Hash>] {
        &self.levels
    }

    /// One stored level.
    pub fn level(&self, index: usize) -> Option<&[Hash]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    /// Proofs for every leaf in input order.
    pub fn proofs(&self) -> &[Proof] {
        &self.proofs
    }

    /// The proof for the leaf at `index`.
    pub fn proof_at(&self, index: usize) -> Option<&Proof> {
        self.proofs.get(index)
    }
}
