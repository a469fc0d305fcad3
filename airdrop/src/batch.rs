//! Splitting a whitelist into transfer batches.
//!
//! Every batch is meant for one `batchTransfer(recipients, amount, proofs)`
//! call on the airdrop contract. The contract either pays all recipients of a
//! batch or reverts as a whole; nothing here enforces or observes that, the
//! plan merely keeps recipients and their proofs aligned.

use std::num::NonZeroUsize;

use itertools::Itertools;
use merkle_whitelist::prelude::*;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::address_list::AddressList;
use crate::amount::TokenAmount;

/// The number of recipients per transfer used for the original airdrop.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(100).expect("100 is non-zero");

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum PlanError {
    #[error("cannot skip {skip} entries of an address list with {len} entries")]
    SkipExceedsList { skip: usize, len: usize },

    #[error("failed to build Merkle tree")]
    MerkleTree(#[from] MerkleTreeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub index: usize,
    pub recipients: Vec<String>,
    pub amount: TokenAmount,
    pub proofs: Vec<MerkleProof>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}

/// Everything an external submitter needs to carry out the airdrop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropPlan {
    pub merkle_root: Digest,
    pub amount_per_recipient: TokenAmount,
    pub num_recipients: usize,
    pub total_amount: TokenAmount,
    pub batches: Vec<Batch>,
}

impl AirdropPlan {
    /// The tree covers the whole list. Batching starts after the first
    /// `skip_leading` entries.
    pub fn new(
        tree: &MerkleTree,
        list: &AddressList,
        amount: TokenAmount,
        batch_size: NonZeroUsize,
        skip_leading: usize,
    ) -> Result<Self, PlanError> {
        let entries = list.entries();
        let recipients = entries
            .get(skip_leading..)
            .ok_or(PlanError::SkipExceedsList {
                skip: skip_leading,
                len: entries.len(),
            })?;

        let batches: Vec<Batch> = recipients
            .chunks(batch_size.get())
            .enumerate()
            .map(|(index, chunk)| {
                let proofs: Vec<MerkleProof> = chunk
                    .iter()
                    .map(|recipient| tree.proof(recipient))
                    .try_collect()?;
                Ok::<_, PlanError>(Batch {
                    index,
                    recipients: chunk.to_vec(),
                    amount: amount.clone(),
                    proofs,
                })
            })
            .try_collect()?;

        let num_recipients = recipients.len();
        tracing::info!(
            num_recipients,
            num_batches = batches.len(),
            batch_size = batch_size.get(),
            skip_leading,
            "planned airdrop"
        );

        Ok(Self {
            merkle_root: tree.root(),
            total_amount: amount.times(num_recipients),
            amount_per_recipient: amount,
            num_recipients,
            batches,
        })
    }

    /// Build the tree over the full list, then plan.
    pub fn from_address_list(
        list: &AddressList,
        amount: TokenAmount,
        batch_size: NonZeroUsize,
        skip_leading: usize,
    ) -> Result<Self, PlanError> {
        let tree = MerkleTree::build(list.entries())?;
        Self::new(&tree, list, amount, batch_size, skip_leading)
    }

    /// Check every proof of every batch against the plan's root.
    pub fn verify(&self) -> bool {
        self.batches.iter().all(|batch| {
            batch.recipients.len() == batch.proofs.len()
                && batch
                    .recipients
                    .iter()
                    .zip_eq(&batch.proofs)
                    .all(|(recipient, proof)| {
                        let leaf = Keccak256::hash_input(recipient);
                        proof.verify::<Keccak256>(leaf, self.merkle_root)
                    })
        })
    }
}
