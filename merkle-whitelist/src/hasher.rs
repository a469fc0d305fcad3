use sha3::Digest as _;

use crate::digest::Digest;

/// The hash function a [`MerkleTree`](crate::merkle_tree::MerkleTree) is built
/// with. Whatever verifies proofs elsewhere, typically a contract, must use
/// the very same function, or roots and proofs silently disagree.
pub trait MerkleHasher: Send + Sync {
    /// Hash a variable-length sequence of bytes.
    fn hash_varlen(input: &[u8]) -> Digest;

    /// Hash two digests in canonical order: the smaller digest, compared
    /// byte-wise, is always absorbed first. The result does not depend on the
    /// order of the arguments.
    fn hash_pair(left: Digest, right: Digest) -> Digest {
        let (first, second) = if left <= right {
            (left, right)
        } else {
            (right, left)
        };

        let mut input = [0; 2 * Digest::BYTES];
        input[..Digest::BYTES].copy_from_slice(&first.0);
        input[Digest::BYTES..].copy_from_slice(&second.0);
        Self::hash_varlen(&input)
    }

    /// Hash one raw whitelist entry into a leaf.
    ///
    /// An entry that is `0x` followed by an even number of hex characters is
    /// decoded and its bytes are hashed. Any other entry is hashed as UTF-8
    /// text. The entry is taken verbatim, surrounding whitespace included.
    /// For an Ethereum address this gives `keccak256(abi.encodePacked(addr))`
    /// with [`Keccak256`].
    fn hash_input(input: &str) -> Digest {
        match decode_prefixed_hex(input) {
            Some(bytes) => Self::hash_varlen(&bytes),
            None => Self::hash_varlen(input.as_bytes()),
        }
    }
}

fn decode_prefixed_hex(input: &str) -> Option<Vec<u8>> {
    let hex_str = input.strip_prefix("0x")?;
    hex::decode(hex_str).ok()
}

/// Keccak-256 as used by the EVM, _i.e._, with the original Keccak padding
/// and not the padding of the standardized SHA3-256.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak256;

impl MerkleHasher for Keccak256 {
    fn hash_varlen(input: &[u8]) -> Digest {
        let hash: [u8; Digest::BYTES] = sha3::Keccak256::digest(input).into();
        Digest::new(hash)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    #[test]
    fn keccak_of_empty_input_matches_known_value() {
        let expected = "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";
        assert_eq!(expected, Keccak256::hash_varlen(&[]).to_string());
    }

    #[test]
    fn keccak_of_text_matches_known_value() {
        let expected = "0x3ac225168df54212a25c1c01fd35bebfea408fdac2e31ddd6f80a4bbf9a5f1cb";
        assert_eq!(expected, Keccak256::hash_input("a").to_string());
    }

    #[proptest]
    fn pair_hashing_is_commutative(left: Digest, right: Digest) {
        prop_assert_eq!(
            Keccak256::hash_pair(left, right),
            Keccak256::hash_pair(right, left)
        );
    }

    #[proptest]
    fn pair_hashing_absorbs_smaller_digest_first(left: Digest, right: Digest) {
        let (first, second) = if left <= right { (left, right) } else { (right, left) };
        let concatenation = [first.0, second.0].concat();
        prop_assert_eq!(
            Keccak256::hash_varlen(&concatenation),
            Keccak256::hash_pair(left, right)
        );
    }

    #[test]
    fn prefixed_hex_input_is_hashed_as_bytes() {
        let address = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";
        let bytes = hex::decode(&address[2..]).unwrap();
        assert_eq!(20, bytes.len());
        assert_eq!(Keccak256::hash_varlen(&bytes), Keccak256::hash_input(address));
        assert_ne!(
            Keccak256::hash_varlen(address.as_bytes()),
            Keccak256::hash_input(address)
        );
    }

    #[test]
    fn hex_case_does_not_change_leaf() {
        let checksummed = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";
        let lower = checksummed.to_lowercase();
        assert_eq!(Keccak256::hash_input(checksummed), Keccak256::hash_input(&lower));
    }

    #[test]
    fn malformed_hex_input_is_hashed_as_text() {
        for input in ["0xabc", "0xnothex", "abcd", "0x"] {
            let expected = match input {
                "0x" => Keccak256::hash_varlen(&[]),
                _ => Keccak256::hash_varlen(input.as_bytes()),
            };
            assert_eq!(expected, Keccak256::hash_input(input), "input: {input}");
        }
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_entry() {
        for input in [" 0xaa", "0xaa\n", " a"] {
            assert_eq!(
                Keccak256::hash_varlen(input.as_bytes()),
                Keccak256::hash_input(input),
                "input: {input:?}"
            );
        }
        assert_ne!(Keccak256::hash_input("0xaa"), Keccak256::hash_input(" 0xaa"));
    }
}
