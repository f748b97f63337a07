// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hashed string identities
//!
//! A `HashedId` keeps the original string for diagnostics but compares,
//! orders and hashes by a 32-bit checksum computed once at construction.
//!
//! Two distinct strings whose checksums collide are treated as the SAME
//! identity. Collisions are neither detected nor reported; pick identity
//! names with that in mind.

use crc::{Crc, CRC_32_BZIP2};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// MSB-first CRC-32 (poly 0x04C11DB7, init and xorout 0xFFFFFFFF), the
// cksum(1) table without the trailing length bytes.
const CKSUM: Crc<u32> = Crc::<u32>::new(&CRC_32_BZIP2);

/// Computes the 32-bit checksum of a string's raw bytes
pub const fn memcrc(source: &str) -> u32 {
    CKSUM.checksum(source.as_bytes())
}

/// String identity compared by checksum only
#[derive(Clone)]
pub struct HashedId {
    checksum: u32,
    text: Cow<'static, str>,
}

impl HashedId {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            checksum: memcrc(&text),
            text: Cow::Owned(text),
        }
    }

    /// Builds an identity at compile time, for use in `static` items
    pub const fn from_static(text: &'static str) -> Self {
        Self {
            checksum: memcrc(text),
            text: Cow::Borrowed(text),
        }
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// The string this identity was created from
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl PartialEq for HashedId {
    fn eq(&self, other: &Self) -> bool {
        self.checksum == other.checksum
    }
}

impl Eq for HashedId {}

impl PartialOrd for HashedId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HashedId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.checksum.cmp(&other.checksum)
    }
}

impl Hash for HashedId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.checksum.hash(state);
    }
}

impl fmt::Debug for HashedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashedId({:?}, {:#010x})", self.text, self.checksum)
    }
}

impl fmt::Display for HashedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for HashedId {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for HashedId {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;
