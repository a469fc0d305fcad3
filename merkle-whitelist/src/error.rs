use thiserror::Error;

use crate::digest::Digest;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum TryFromDigestError {
    #[error("expected {expected} bytes for digest, but got {0}", expected = Digest::BYTES)]
    InvalidLength(usize),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TryFromHexDigestError {
    #[error("hex decoding error")]
    HexDecode(#[from] hex::FromHexError),

    #[error("digest error")]
    Digest(#[from] TryFromDigestError),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[non_exhaustive]
pub enum MerkleTreeError {
    #[error("cannot build a Merkle tree from zero leaves")]
    EmptyInput,

    #[error("leaf {0} is not part of the Merkle tree")]
    LeafNotFound(Digest),

    #[error("leaf index {index} is out of bounds for tree with {leaf_count} leaves")]
    LeafIndexOutOfBounds { index: usize, leaf_count: usize },
}
