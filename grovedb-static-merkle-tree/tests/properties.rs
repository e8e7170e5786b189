use grovedb_static_merkle_tree::{
    Block, Error, MerkleTree, Proof, Sha256Hasher, tree_depth, verify,
};
use proptest::{collection::vec, prelude::*};

fn blocks_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    vec(vec(any::<u8>(), 0..24), 2..80)
}

proptest! {
    #[test]
    fn depth_is_ceil_log2(count in 2usize..1_000_000) {
        let expected = usize::BITS - (count - 1).leading_zeros();
        prop_assert_eq!(tree_depth(count), expected);
    }

    #[test]
    fn every_block_verifies(data in blocks_strategy()) {
        let tree: MerkleTree = MerkleTree::new(&data).expect("build tree");
        prop_assert_eq!(tree.num_leaves(), data.len());
        prop_assert_eq!(tree.depth(), tree_depth(data.len()));
        for block in &data {
            let proof = tree.proof(block).expect("proof");
            prop_assert_eq!(proof.len(), tree.depth() as usize);
            prop_assert!(verify::<Sha256Hasher, _>(block, Some(&proof), tree.root()).expect("verify"));
        }
    }

    #[test]
    fn flipped_sibling_byte_fails(
        data in blocks_strategy(),
        pick in any::<prop::sample::Index>(),
        level in any::<prop::sample::Index>(),
        byte in 0usize..32,
    ) {
        let tree: MerkleTree = MerkleTree::new(&data).expect("build tree");
        let block = pick.get(&data);
        let (mut siblings, path) = tree.proof(block).expect("proof").into_parts();
        let level = level.index(siblings.len());
        siblings[level][byte] ^= 0x80;
        let tampered = Proof::new(siblings, path);
        prop_assert!(!tree.verify(block, Some(&tampered)).expect("verify"));
    }

    #[test]
    fn outsiders_are_not_found(data in blocks_strategy(), outsider in vec(any::<u8>(), 25..40)) {
        // members are at most 23 bytes long
        let tree: MerkleTree = MerkleTree::new(&data).expect("build tree");
        prop_assert_eq!(tree.proof(&outsider), Err(Error::BlockNotFound));
    }

    #[test]
    fn building_twice_is_identical(data in blocks_strategy()) {
        let first: MerkleTree = MerkleTree::new(&data).expect("first build");
        let second: MerkleTree = MerkleTree::new(&data).expect("second build");
        prop_assert_eq!(first.root(), second.root());
        prop_assert_eq!(first.proofs(), second.proofs());
    }

    #[test]
    fn proofs_survive_encoding(data in blocks_strategy(), pick in any::<prop::sample::Index>()) {
        let tree: MerkleTree = MerkleTree::new(&data).expect("build tree");
        let block = Block::new(pick.get(&data).clone());
        let proof = tree.proof(&block).expect("proof");
        let decoded = Proof::decode_from_slice(&proof.encode_to_vec().expect("encode"))
            .expect("decode");
        prop_assert_eq!(&decoded, &proof);
        prop_assert!(decoded.verify::<Sha256Hasher, _>(&block, tree.root()).expect("verify"));
    }
}

#[test]
fn wrong_root_fails() {
    let data: Vec<Vec<u8>> = (0u8..10).map(|i| vec![i; 3]).collect();
    let tree: MerkleTree = MerkleTree::new(&data).expect("build tree");
    let proof = tree.proof(&data[3]).expect("proof");
    let mut root = *tree.root();
    root[0] ^= 0xff;
    assert!(!verify::<Sha256Hasher, _>(&data[3], Some(&proof), &root).expect("verify"));
}
