pub use crate::config::MerkleTreeConfig;
pub use crate::digest::Digest;
pub use crate::error::MerkleTreeError;
pub use crate::error::TryFromDigestError;
pub use crate::error::TryFromHexDigestError;
pub use crate::hasher::Keccak256;
pub use crate::hasher::MerkleHasher;
pub use crate::merkle_tree::LeafOrder;
pub use crate::merkle_tree::MerkleProof;
pub use crate::merkle_tree::MerkleTree;
