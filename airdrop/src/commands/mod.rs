use std::path::PathBuf;

use airdrop::address_list::AddressList;
use anyhow::Context;
use anyhow::Result;
use clap::ValueEnum;
use merkle_whitelist::prelude::*;

pub(crate) mod plan;
pub(crate) mod proofs;
pub(crate) mod root;
pub(crate) mod verify;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum LeafOrderArg {
    /// Keep leaves in list order
    #[default]
    AsGiven,
    /// Sort leaves; the root does not depend on the order of the list
    Sorted,
}

impl From<LeafOrderArg> for LeafOrder {
    fn from(arg: LeafOrderArg) -> Self {
        match arg {
            LeafOrderArg::Sorted => LeafOrder::Sorted,
            LeafOrderArg::AsGiven => LeafOrder::AsGiven,
        }
    }
}

/// Address list and tree options shared by all list-consuming commands.
#[derive(clap::Args, Debug)]
pub(crate) struct InputArgs {
    /// Address list, entries separated by newlines or spaces
    #[arg(short, long, env = "AIRDROP_INPUT")]
    pub input: PathBuf,

    /// Reject entries that are not 0x-prefixed 20-byte hex addresses
    #[arg(long, env = "AIRDROP_STRICT")]
    pub strict: bool,

    /// Position of the leaves in the Merkle tree
    #[arg(long, value_enum, default_value_t, env = "AIRDROP_LEAF_ORDER")]
    pub leaf_order: LeafOrderArg,
}

impl InputArgs {
    pub fn load(&self) -> Result<(AddressList, MerkleTree)> {
        let list = AddressList::read(&self.input)?;
        tracing::info!(num_addresses = list.len(), "loaded address list");

        if self.strict {
            list.ensure_all_addresses()?;
        } else if let Err(err) = list.ensure_all_addresses() {
            tracing::warn!("{err}; hashing non-address entries as text");
        }

        let tree = MerkleTree::build_with_order(list.entries(), self.leaf_order.into())
            .context("Failed to build Merkle tree")?;
        tracing::info!(root = %tree.root(), height = tree.height(), "built Merkle tree");

        Ok((list, tree))
    }
}
