use merkle_whitelist::prelude::*;
use serde::Deserialize;
use serde::Serialize;

use crate::address_list::AddressList;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressProof {
    pub address: String,
    pub leaf: Digest,
    pub proof: MerkleProof,
}

/// One proof per entry of the address list, in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistProofs {
    pub merkle_root: Digest,
    pub proofs: Vec<AddressProof>,
}

impl WhitelistProofs {
    pub fn new(tree: &MerkleTree, list: &AddressList) -> Result<Self, MerkleTreeError> {
        let proofs = list
            .entries()
            .iter()
            .map(|address| {
                let leaf = Keccak256::hash_input(address);
                let proof = tree.proof_for_leaf(leaf)?;
                Ok(AddressProof {
                    address: address.clone(),
                    leaf,
                    proof,
                })
            })
            .collect::<Result<Vec<_>, MerkleTreeError>>()?;

        Ok(Self {
            merkle_root: tree.root(),
            proofs,
        })
    }

    pub fn find(&self, address: &str) -> Option<&AddressProof> {
        self.proofs.iter().find(|p| p.address == address)
    }
}
