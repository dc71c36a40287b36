use std::fmt;
use std::str::FromStr;

use floe_common::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Identifier of an object held by the object store.
///
/// The canonical text form is `o` followed by 16 lowercase hex digits, e.g.
/// `o0000000000001234`. Parsing also accepts the bare hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "o{:016x}", self.0)
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix('o').unwrap_or(s);
        if digits.is_empty() || digits.len() > 16 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidObjectId(s.to_string()));
        }
        u64::from_str_radix(digits, 16)
            .map(ObjectId)
            .map_err(|_| Error::InvalidObjectId(s.to_string()))
    }
}

impl From<u64> for ObjectId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
