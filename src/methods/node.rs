use crate::error::{HashError, Result};
use serde::{Deserialize, Serialize};

/// A digest together with the inclusive byte range it covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashNode {
    digest: Vec<u8>,
    range_start: i64,
    range_end: i64,
}

impl HashNode {
    /// Node over `range_start..=range_end`. Negative offsets are rejected.
    pub fn new(digest: Vec<u8>, range_start: i64, range_end: i64) -> Result<Self> {
        let mut node = Self::with_digest(digest);
        node.set_range_start(range_start)?;
        node.set_range_end(range_end)?;
        Ok(node)
    }

    /// Node with a digest and a `0..=0` range
    pub fn with_digest(digest: Vec<u8>) -> Self {
        Self {
            digest,
            range_start: 0,
            range_end: 0,
        }
    }

    /// Node over a range that may be empty (`range_end == range_start - 1`)
    pub(crate) fn spanning(digest: Vec<u8>, range_start: i64, range_end: i64) -> Self {
        Self {
            digest,
            range_start,
            range_end,
        }
    }

    /// Digest bytes
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Replace the digest
    pub fn set_digest(&mut self, digest: Vec<u8>) {
        self.digest = digest;
    }

    /// Offset of the first covered byte
    pub fn range_start(&self) -> i64 {
        self.range_start
    }

    /// Offset of the last covered byte
    pub fn range_end(&self) -> i64 {
        self.range_end
    }

    /// Set the first covered offset
    pub fn set_range_start(&mut self, offset: i64) -> Result<()> {
        self.range_start = non_negative("range start", offset)?;
        Ok(())
    }

    /// Set the last covered offset
    pub fn set_range_end(&mut self, offset: i64) -> Result<()> {
        self.range_end = non_negative("range end", offset)?;
        Ok(())
    }

    /// Number of covered bytes; negative when the range is inverted
    pub fn count(&self) -> i64 {
        self.range_end - self.range_start + 1
    }

    /// Digest as lowercase hex
    pub fn to_hex(&self) -> String {
        hex::encode(&self.digest)
    }
}

fn non_negative(what: &str, offset: i64) -> Result<i64> {
    if offset < 0 {
        return Err(HashError::validation(format!(
            "{what} must not be negative, got {offset}"
        )));
    }
    Ok(offset)
}
