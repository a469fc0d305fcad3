use core::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;

/// Number of decimals of an ERC-20 token that follows ether's convention.
pub const DEFAULT_DECIMALS: u32 = 18;

/// A `uint256` has at most 78 decimal digits, so a token with more decimals
/// could not represent a single whole token.
pub const MAX_DECIMALS: u32 = 77;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount `{0}` has more than one decimal point")]
    MultipleDecimalPoints(String),

    #[error("amount contains invalid character `{0}`")]
    InvalidCharacter(char),

    #[error("amount has {given} fractional digits, but the token only has {decimals} decimals")]
    TooManyDecimals { given: usize, decimals: u32 },

    #[error("tokens have at most {max} decimals, but got {0}", max = MAX_DECIMALS)]
    DecimalsOutOfRange(u32),
}

/// An amount of tokens in the token's smallest unit, _e.g._, wei for ether.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(pub BigUint);

impl TokenAmount {
    /// Parse a human-readable decimal amount like `"5"` or `"0.25"` into base
    /// units of a token with `decimals` decimals.
    ///
    /// ```
    /// # use airdrop::amount::TokenAmount;
    /// let five_ether = TokenAmount::parse_units("5", 18).unwrap();
    /// assert_eq!("5000000000000000000", five_ether.to_string());
    /// ```
    pub fn parse_units(amount: &str, decimals: u32) -> Result<Self, AmountError> {
        if decimals > MAX_DECIMALS {
            return Err(AmountError::DecimalsOutOfRange(decimals));
        }

        let amount = amount.trim();
        if amount.is_empty() || amount == "." {
            return Err(AmountError::Empty);
        }

        let (integer, fraction) = match amount.split_once('.') {
            Some((_, fraction)) if fraction.contains('.') => {
                return Err(AmountError::MultipleDecimalPoints(amount.to_string()));
            }
            Some((integer, fraction)) => (integer, fraction),
            None => (amount, ""),
        };

        if let Some(invalid) = integer
            .chars()
            .chain(fraction.chars())
            .find(|c| !c.is_ascii_digit())
        {
            return Err(AmountError::InvalidCharacter(invalid));
        }

        let decimals_usize = decimals as usize;
        if fraction.len() > decimals_usize {
            return Err(AmountError::TooManyDecimals {
                given: fraction.len(),
                decimals,
            });
        }

        let padding = "0".repeat(decimals_usize - fraction.len());
        let digits = format!("{integer}{fraction}{padding}");
        let base_units = BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_default();

        Ok(Self(base_units))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The total paid out when every one of `num_recipients` receives this amount.
    pub fn times(&self, num_recipients: usize) -> Self {
        Self(&self.0 * BigUint::from(num_recipients))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenAmount {
    type Err = AmountError;

    /// Parses an amount already expressed in base units.
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Self::parse_units(string, 0)
    }
}

impl From<u128> for TokenAmount {
    fn from(value: u128) -> Self {
        Self(value.into())
    }
}

// serialize as decimal string for human readable formats like JSON, since
// base-unit amounts routinely exceed the range JSON numbers survive in
impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            self.to_string().serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let string = String::deserialize(deserializer)?;
            string.parse().map_err(serde::de::Error::custom)
        } else {
            Ok(Self(BigUint::deserialize(deserializer)?))
        }
    }
}
