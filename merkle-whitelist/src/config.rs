//! Knobs for building a [`MerkleTree`](crate::merkle_tree::MerkleTree).
//!
//! None of them changes the resulting root, except for the [`LeafOrder`].
//! The defaults suit address lists of any size.

use crate::merkle_tree::LeafOrder;

/// Environment variable overriding the default parallelization cutoff.
pub const PARALLELIZATION_CUTOFF_ENV_VAR: &str = "MERKLE_WHITELIST_PARALLELIZATION_CUTOFF";

const DEFAULT_PARALLELIZATION_CUTOFF: usize = 512;
const MINIMUM_PARALLELIZATION_CUTOFF: usize = 2;

/// How a [`MerkleTree`](crate::merkle_tree::MerkleTree) is built.
///
/// ```
/// # use merkle_whitelist::prelude::*;
/// let config = MerkleTreeConfig::default()
///     .with_leaf_order(LeafOrder::Sorted)
///     .with_parallelization_cutoff(1024);
/// let tree: MerkleTree = MerkleTree::build_with_config(&["b", "a"], config)?;
/// assert!(tree.leaves().is_sorted());
/// # Ok::<(), MerkleTreeError>(())
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MerkleTreeConfig {
    leaf_order: LeafOrder,
    parallelization_cutoff: usize,
}

impl Default for MerkleTreeConfig {
    /// Leaves as given. The parallelization cutoff is read from
    /// [`PARALLELIZATION_CUTOFF_ENV_VAR`] if that holds a number.
    fn default() -> Self {
        let from_env = std::env::var(PARALLELIZATION_CUTOFF_ENV_VAR).ok();
        Self {
            leaf_order: LeafOrder::default(),
            parallelization_cutoff: cutoff_or_default(from_env.as_deref()),
        }
    }
}

impl MerkleTreeConfig {
    pub fn with_leaf_order(mut self, leaf_order: LeafOrder) -> Self {
        self.leaf_order = leaf_order;
        self
    }

    /// Every level with at least `cutoff` nodes is reduced to its parent level
    /// on rayon's thread pool, smaller levels are hashed sequentially. The
    /// tree is identical either way. Values below 2 are raised to 2.
    pub fn with_parallelization_cutoff(mut self, cutoff: usize) -> Self {
        self.parallelization_cutoff = cutoff.max(MINIMUM_PARALLELIZATION_CUTOFF);
        self
    }

    pub fn leaf_order(&self) -> LeafOrder {
        self.leaf_order
    }

    pub fn parallelization_cutoff(&self) -> usize {
        self.parallelization_cutoff
    }
}

fn cutoff_or_default(value: Option<&str>) -> usize {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_PARALLELIZATION_CUTOFF)
        .max(MINIMUM_PARALLELIZATION_CUTOFF)
}
