//! Merkle trees over whitelists, as committed to by airdrop and allow-list
//! contracts.
//!
//! Leaves are the Keccak-256 hashes of whitelist entries. Pairs of nodes are
//! hashed in canonical order, _i.e._, the smaller digest first, so that a
//! proof is a plain list of sibling digests without any left/right
//! information. A level with an odd number of nodes pairs its last node with
//! itself.
//!
//! ```
//! use merkle_whitelist::prelude::*;
//!
//! let tree: MerkleTree = MerkleTree::build(&["a", "b", "c"])?;
//! let proof = tree.proof("b")?;
//! assert!(proof.verify::<Keccak256>(Keccak256::hash_input("b"), tree.root()));
//! # Ok::<(), MerkleTreeError>(())
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(clippy::shadow_unrelated)]
pub mod config;
pub mod digest;
pub mod error;
pub mod hasher;
pub mod merkle_tree;
pub mod prelude;
