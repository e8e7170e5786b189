//! Test helpers: block and hasher fakes, and a per-leaf walk used as the
//! reference for batched proof generation.

use std::borrow::Cow;

use crate::{Block, DataBlock, Error, Hash, MerkleHasher, Proof, Result, Sha256Hasher};

/// Blocks `"0"`, `"1"`, ... `"{count - 1}"`.
pub(crate) fn numbered_blocks(count: usize) -> Vec<Block> {
    (0..count).map(|i| Block::from(i.to_string().as_str())).collect()
}

/// Route `log` output through the test harness.
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Derive the proof of leaf `index` by walking up from the leaf, one level
/// at a time.
pub(crate) fn walk_proof(levels: &[Vec<Hash>], mut index: usize) -> Proof {
    let mut siblings = Vec::with_capacity(levels.len());
    let mut path = 0u64;
    for (step, level) in levels.iter().enumerate() {
        if index & 1 == 1 {
            siblings.push(level[index - 1]);
        } else {
            siblings.push(level[index + 1]);
            path += 1 << step;
        }
        index >>= 1;
    }
    Proof::new(siblings, path)
}

/// A block whose serialization can be made to fail.
pub(crate) struct FailingBlock {
    data: Option<Vec<u8>>,
}

impl FailingBlock {
    pub fn ok(data: &str) -> Self {
        FailingBlock {
            data: Some(data.as_bytes().to_vec()),
        }
    }

    pub fn failing() -> Self {
        FailingBlock { data: None }
    }
}

impl DataBlock for FailingBlock {
    fn serialize(&self) -> Result<Cow<'_, [u8]>> {
        self.data
            .as_deref()
            .map(Cow::Borrowed)
            .ok_or_else(|| Error::Serialization("block refused to serialize".into()))
    }
}

/// SHA-256 that fails for any 64-byte input, i.e. every node combine.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingNodeHasher;

impl MerkleHasher for FailingNodeHasher {
    fn hash(data: &[u8]) -> Result<Hash> {
        if data.len() == 64 {
            return Err(Error::HashFailure("node hashing disabled".into()));
        }
        Sha256Hasher::hash(data)
    }
}
