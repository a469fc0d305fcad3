use std::collections::HashMap;
use std::marker::PhantomData;
use std::ops::Deref;
use std::ops::DerefMut;

use itertools::Itertools;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSlice;
use serde::Deserialize;
use serde::Serialize;

use crate::config::MerkleTreeConfig;
use crate::digest::Digest;
use crate::error::MerkleTreeError;
use crate::hasher::Keccak256;
use crate::hasher::MerkleHasher;

type Result<T> = std::result::Result<T, MerkleTreeError>;

/// Position of the leaves in the bottom level of a [`MerkleTree`].
///
/// Canonical pair hashing alone does not make the root independent of the
/// input order: reordering the input changes which leaves end up paired. Only
/// [`Sorted`](Self::Sorted) gives the same root for every permutation of the
/// same entries.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum LeafOrder {
    /// Leaf `i` is the hash of input `i`. Reordering the input may change the
    /// root.
    #[default]
    AsGiven,

    /// Leaves are sorted ascending before the tree is built. The root only
    /// depends on the multiset of leaves, not on the order they are supplied
    /// in.
    Sorted,
}

/// A binary Merkle tree with canonically ordered pair hashing.
///
/// The tree is stored level by level, `levels[0]` being the leaves and the
/// last level holding only the root. A level with an odd number of nodes
/// pairs its last node with itself.
///
/// ```markdown
///          root
///         /    \
///      ab        cc
///     /  \      /  \
///    a    b    c   (c)
/// ```
///
/// Every parent is `H(min(l, r) ‖ max(l, r))`, so a verifier never needs to
/// know on which side a sibling was.
#[derive(Debug)]
pub struct MerkleTree<H = Keccak256>
where
    H: MerkleHasher,
{
    levels: Vec<Vec<Digest>>,
    leaf_indices: HashMap<Digest, usize>,
    _hasher: PhantomData<H>,
}

impl<H> Clone for MerkleTree<H>
where
    H: MerkleHasher,
{
    fn clone(&self) -> Self {
        Self {
            levels: self.levels.clone(),
            leaf_indices: self.leaf_indices.clone(),
            _hasher: PhantomData,
        }
    }
}

impl<H> PartialEq for MerkleTree<H>
where
    H: MerkleHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.levels == other.levels
    }
}

impl<H> Eq for MerkleTree<H> where H: MerkleHasher {}

/// The authentication path of one leaf: its sibling, its parent's sibling,
/// and so on, up to but excluding the root.
///
/// The proof carries no left/right information; [`MerkleProof::verify`]
/// relies on canonical pair hashing instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MerkleProof(pub Vec<Digest>);

impl Deref for MerkleProof {
    type Target = Vec<Digest>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MerkleProof {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Digest>> for MerkleProof {
    fn from(path: Vec<Digest>) -> Self {
        Self(path)
    }
}

impl MerkleProof {
    /// Fold the leaf with every element of the path.
    pub fn root_from_leaf<H: MerkleHasher>(&self, leaf: Digest) -> Digest {
        self.iter()
            .fold(leaf, |acc_hash, &sibling| H::hash_pair(acc_hash, sibling))
    }

    /// Does this proof lead from `leaf` to `expected_root`?
    ///
    /// Needs no [`MerkleTree`]. This is the computation an on-chain verifier
    /// such as OpenZeppelin's `MerkleProof.verify` repeats.
    pub fn verify<H: MerkleHasher>(&self, leaf: Digest, expected_root: Digest) -> bool {
        self.root_from_leaf::<H>(leaf) == expected_root
    }
}

impl<H> MerkleTree<H>
where
    H: MerkleHasher,
{
    /// Hash every input into a leaf, in input order, then build the tree.
    pub fn build<S: AsRef<str>>(inputs: &[S]) -> Result<Self> {
        Self::build_with_config(inputs, MerkleTreeConfig::default())
    }

    pub fn build_with_order<S: AsRef<str>>(inputs: &[S], order: LeafOrder) -> Result<Self> {
        Self::build_with_config(inputs, MerkleTreeConfig::default().with_leaf_order(order))
    }

    pub fn build_with_config<S: AsRef<str>>(
        inputs: &[S],
        config: MerkleTreeConfig,
    ) -> Result<Self> {
        let leaves = inputs
            .iter()
            .map(|input| H::hash_input(input.as_ref()))
            .collect_vec();
        Self::from_leaves_with_config(leaves, config)
    }

    /// Build the tree over already hashed leaves, keeping their order.
    pub fn from_leaves(leaves: Vec<Digest>) -> Result<Self> {
        Self::from_leaves_with_config(leaves, MerkleTreeConfig::default())
    }

    pub fn from_leaves_with_order(leaves: Vec<Digest>, order: LeafOrder) -> Result<Self> {
        Self::from_leaves_with_config(leaves, MerkleTreeConfig::default().with_leaf_order(order))
    }

    pub fn from_leaves_with_config(
        mut leaves: Vec<Digest>,
        config: MerkleTreeConfig,
    ) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleTreeError::EmptyInput);
        }
        if config.leaf_order() == LeafOrder::Sorted {
            leaves.sort_unstable();
        }

        // Duplicates resolve to their first occurrence.
        let mut leaf_indices = HashMap::with_capacity(leaves.len());
        for (index, &leaf) in leaves.iter().enumerate() {
            leaf_indices.entry(leaf).or_insert(index);
        }

        let cutoff = config.parallelization_cutoff();
        let num_leaves = leaves.len();
        let mut levels = vec![leaves];
        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let parents = if level.len() >= cutoff {
                Self::parent_level_parallel(level)
            } else {
                Self::parent_level_sequential(level)
            };
            levels.push(parents);
        }

        tracing::debug!(
            num_leaves,
            num_distinct_leaves = leaf_indices.len(),
            height = levels.len() - 1,
            parallelization_cutoff = cutoff,
            "built Merkle tree"
        );

        Ok(Self {
            levels,
            leaf_indices,
            _hasher: PhantomData,
        })
    }

    fn hash_siblings(siblings: &[Digest]) -> Digest {
        let left = siblings[0];
        let right = siblings.get(1).copied().unwrap_or(left);
        H::hash_pair(left, right)
    }

    fn parent_level_sequential(level: &[Digest]) -> Vec<Digest> {
        level.chunks(2).map(Self::hash_siblings).collect()
    }

    fn parent_level_parallel(level: &[Digest]) -> Vec<Digest> {
        level.par_chunks(2).map(Self::hash_siblings).collect()
    }

    /// Static counterpart of [`MerkleProof::verify`], for callers that hold
    /// only the root, a leaf, and a proof.
    pub fn verify(leaf: Digest, proof: &MerkleProof, expected_root: Digest) -> bool {
        proof.verify::<H>(leaf, expected_root)
    }

    pub fn root(&self) -> Digest {
        // Construction never produces an empty level.
        self.levels[self.levels.len() - 1][0]
    }

    /// The number of levels above the leaves. Also the length of every proof.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    pub fn leaves(&self) -> &[Digest] {
        &self.levels[0]
    }

    pub fn leaf(&self, index: usize) -> Option<Digest> {
        self.leaves().get(index).copied()
    }

    /// The index of the first leaf equal to `leaf`, if any.
    pub fn leaf_index(&self, leaf: Digest) -> Option<usize> {
        self.leaf_indices.get(&leaf).copied()
    }

    pub fn contains(&self, input: &str) -> bool {
        self.leaf_index(H::hash_input(input)).is_some()
    }

    /// The proof for a raw whitelist entry, hashed the same way as during
    /// [`build`](Self::build).
    pub fn proof(&self, input: &str) -> Result<MerkleProof> {
        self.proof_for_leaf(H::hash_input(input))
    }

    pub fn proof_for_leaf(&self, leaf: Digest) -> Result<MerkleProof> {
        let index = self
            .leaf_index(leaf)
            .ok_or(MerkleTreeError::LeafNotFound(leaf))?;
        self.authentication_path(index)
    }

    /// The sibling of the indicated leaf, the sibling of its parent, and so
    /// on. A node without sibling is its own sibling.
    ///
    /// ```markdown
    ///              root
    ///             /    \
    ///           ab      cc
    ///          /  \    /  \
    ///         a    b  c   (c)
    /// ```
    ///
    /// The authentication path for `c` (index: 2) is `vec![c, ab]`.
    pub fn authentication_path(&self, leaf_index: usize) -> Result<MerkleProof> {
        let leaf_count = self.leaf_count();
        if leaf_index >= leaf_count {
            return Err(MerkleTreeError::LeafIndexOutOfBounds {
                index: leaf_index,
                leaf_count,
            });
        }

        let mut auth_path = Vec::with_capacity(self.height());
        let mut node_index = leaf_index;
        for level in &self.levels[..self.height()] {
            // We get the sibling node by XOR'ing with 1.
            let sibling = level
                .get(node_index ^ 1)
                .copied()
                .unwrap_or(level[node_index]);
            auth_path.push(sibling);
            node_index /= 2;
        }

        Ok(MerkleProof(auth_path))
    }
}
