//! Preparation of a whitelisted token airdrop.
//!
//! The address list is committed to with a [Merkle tree](merkle_whitelist),
//! every address gets an inclusion proof, and the list is split into batches
//! for the airdrop contract's batch transfer. Signing and submitting the
//! transactions is left to external tooling.
#![forbid(unsafe_code)]

pub mod address_list;
pub mod amount;
pub mod batch;
pub mod common;
pub mod proofs;

pub use common::write_file_atomic;
pub use common::write_json_atomic;
