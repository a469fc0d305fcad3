use core::fmt;
use std::str::FromStr;

use arbitrary::Arbitrary;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::TryFromDigestError;
use crate::error::TryFromHexDigestError;

/// The result of hashing a sequence of bytes, for example using
/// [Keccak256](crate::hasher::Keccak256). Sometimes called a “hash”.
///
/// Digests are ordered byte-wise, most significant byte first. This is the
/// ordering used for canonical pairing inside the Merkle tree, and it agrees
/// with comparing the digests as big-endian `uint256`s or as `bytes32` on
/// chain.
// note: Serialize and Deserialize have custom implementations below
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Arbitrary)]
pub struct Digest(pub [u8; Digest::BYTES]);

impl Digest {
    /// The number of bytes in a digest.
    pub const BYTES: usize = 32;

    /// The all-zero digest.
    pub const ALL_ZERO: Self = Self([0; Self::BYTES]);

    pub const fn new(bytes: [u8; Self::BYTES]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(self) -> [u8; Self::BYTES] {
        self.0
    }

    /// Encode digest as hex, without leading “0x”.
    ///
    /// Since `Digest` also implements [`LowerHex`][lo] and [`UpperHex`][up], it is
    /// possible to `{:x}`-format directly, _e.g._, `print!("{digest:x}")`.
    ///
    /// [lo]: fmt::LowerHex
    /// [up]: fmt::UpperHex
    pub fn to_hex(self) -> String {
        format!("{self:x}")
    }

    /// Decode hex string to [`Digest`]. A leading “0x” is accepted.
    pub fn try_from_hex(data: impl AsRef<str>) -> Result<Self, TryFromHexDigestError> {
        let data = data.as_ref().trim();
        let data = data.strip_prefix("0x").unwrap_or(data);
        let bytes = hex::decode(data)?;
        Ok(Self::try_from(bytes.as_slice())?)
    }
}

impl Default for Digest {
    fn default() -> Self {
        Self::ALL_ZERO
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Formats as `0x`-prefixed lower hex, the way digests are exchanged with
/// contracts and block explorers.
impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{self:x}")
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl FromStr for Digest {
    type Err = TryFromHexDigestError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Self::try_from_hex(string)
    }
}

impl From<[u8; Digest::BYTES]> for Digest {
    fn from(bytes: [u8; Digest::BYTES]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; Digest::BYTES] {
    fn from(Digest(bytes): Digest) -> Self {
        bytes
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = TryFromDigestError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        <[u8; Self::BYTES]>::try_from(slice)
            .map(Self)
            .map_err(|_| TryFromDigestError::InvalidLength(slice.len()))
    }
}

// we implement Serialize so that we can serialize as hex for human readable
// formats like JSON but use default serializer for other formats likes bincode
impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            self.to_string().serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

// we impl Deserialize so that we can deserialize as hex for human readable
// formats like JSON but use default deserializer for other formats like bincode
impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let hex_string = String::deserialize(deserializer)?;
            Self::try_from_hex(hex_string).map_err(serde::de::Error::custom)
        } else {
            Ok(Self::new(<[u8; Self::BYTES]>::deserialize(deserializer)?))
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
pub(crate) mod tests {
    use proptest::collection::vec;
    use proptest::prelude::Arbitrary as ProptestArbitrary;
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;
    use test_strategy::proptest;

    use super::*;

    impl ProptestArbitrary for Digest {
        type Parameters = ();
        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            arb().prop_map(|d| d).no_shrink().boxed()
        }

        type Strategy = BoxedStrategy<Self>;
    }

    /// Test helper struct for corrupting digests. Primarily used for negative tests.
    #[derive(Debug, Clone, PartialEq, Eq, test_strategy::Arbitrary)]
    pub(crate) struct DigestCorruptor {
        #[strategy(0..Digest::BYTES)]
        corrupt_index: usize,

        #[strategy(1..=u8::MAX)]
        flip_mask: u8,
    }

    impl DigestCorruptor {
        pub fn corrupt_digest(&self, digest: Digest) -> Digest {
            let mut corrupt_digest = digest;
            corrupt_digest.0[self.corrupt_index] ^= self.flip_mask;
            corrupt_digest
        }
    }

    #[proptest]
    fn corrupting_a_digest_always_changes_it(
        digest: Digest,
        corruptor: DigestCorruptor,
    ) {
        prop_assert_ne!(digest, corruptor.corrupt_digest(digest));
    }

    #[test]
    fn digest_ordering_is_bytewise_big_endian() {
        let val0 = Digest::ALL_ZERO;
        let mut bytes = [0; Digest::BYTES];
        bytes[Digest::BYTES - 1] = 14;
        let val1 = Digest::new(bytes);
        assert!(val1 > val0);

        bytes[0] = 1;
        let val2 = Digest::new(bytes);
        assert!(val2 > val1);

        let val3 = Digest::new([0xff; Digest::BYTES]);
        assert!(val3 > val2);
        assert!(val3 > val0);
    }

    #[proptest]
    fn ordering_agrees_with_byte_slices(left: Digest, right: Digest) {
        prop_assert_eq!(left.cmp(&right), left.0.as_slice().cmp(right.0.as_slice()));
    }

    #[test]
    fn display_is_prefixed_lower_hex() {
        let digest = Digest::new([0xab; Digest::BYTES]);
        let display = digest.to_string();
        assert!(display.starts_with("0x"));
        assert_eq!(2 + 2 * Digest::BYTES, display.len());
        assert_eq!(format!("0x{}", "ab".repeat(Digest::BYTES)), display);
        assert_eq!("AB".repeat(Digest::BYTES), format!("{digest:X}"));
    }

    #[proptest]
    fn hex_is_accepted_with_and_without_prefix(digest: Digest) {
        prop_assert_eq!(digest, Digest::try_from_hex(digest.to_hex()).unwrap());
        prop_assert_eq!(digest, Digest::from_str(&digest.to_string()).unwrap());
    }

    #[test]
    fn hex_of_wrong_length_is_rejected() {
        let err = Digest::try_from_hex("0xabcd").unwrap_err();
        assert_eq!(
            TryFromHexDigestError::Digest(TryFromDigestError::InvalidLength(2)),
            err
        );
    }

    #[test]
    fn non_hex_is_rejected() {
        let err = Digest::try_from_hex("0xzz").unwrap_err();
        assert!(matches!(err, TryFromHexDigestError::HexDecode(_)));
    }

    #[proptest]
    fn byte_slices_of_wrong_length_are_rejected(
        #[strategy(vec(any::<u8>(), 0..64))]
        #[filter(#bytes.len() != Digest::BYTES)]
        bytes: Vec<u8>,
    ) {
        let err = Digest::try_from(bytes.as_slice()).unwrap_err();
        prop_assert_eq!(TryFromDigestError::InvalidLength(bytes.len()), err);
    }

    #[proptest]
    fn serde_json_uses_prefixed_hex(digest: Digest) {
        let json = serde_json::to_string(&digest).unwrap();
        prop_assert_eq!(format!("\"{digest}\""), json.clone());
        let digest_again: Digest = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(digest, digest_again);
    }

    #[proptest]
    fn bincode_uses_raw_bytes(digest: Digest) {
        let encoded = bincode::serialize(&digest).unwrap();
        prop_assert_eq!(Digest::BYTES, encoded.len());
        let digest_again: Digest = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(digest, digest_again);
    }
}
