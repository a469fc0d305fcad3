use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AddressListError {
    #[error("failed to read address list {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("address list contains no addresses")]
    Empty,

    #[error("entry {position} (`{entry}`) is not a 20-byte hex address")]
    InvalidAddress { position: usize, entry: String },
}

/// The ordered entries of a whitelist, usually Ethereum addresses.
///
/// Entries are separated by any whitespace, so one address per line works
/// regardless of line endings, as do space-separated lists. Blank lines are
/// ignored. Entries are kept verbatim and in order; duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressList {
    entries: Vec<String>,
}

impl AddressList {
    pub fn parse(text: &str) -> Result<Self, AddressListError> {
        let entries: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        if entries.is_empty() {
            return Err(AddressListError::Empty);
        }

        Ok(Self { entries })
    }

    pub fn read(path: &Path) -> Result<Self, AddressListError> {
        let text = fs::read_to_string(path).map_err(|source| AddressListError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::parse(&text)?;
        tracing::debug!(?path, num_entries = list.len(), "read address list");

        Ok(list)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails on the first entry that is not `0x` followed by 40 hex characters.
    pub fn ensure_all_addresses(&self) -> Result<(), AddressListError> {
        match self
            .entries
            .iter()
            .position(|entry| !is_hex_address(entry))
        {
            Some(position) => Err(AddressListError::InvalidAddress {
                position,
                entry: self.entries[position].clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn is_hex_address(entry: &str) -> bool {
    entry
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
