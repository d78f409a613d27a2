//! Folder identifier and the reserved pseudo-folder sentinels.
//!
//! Folder ids are plain integers as handed out by the REST layer. Two
//! values are reserved: `-1` ("All") and `0` ("Uncategorized"). They are
//! rendered by the sidebar but are never drag sources, drop targets, or
//! parents. The root of the tree has no id of its own and is modelled as
//! `Option::<FolderId>::None` wherever a parent is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a folder record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(pub i64);

impl FolderId {
    /// The "All" pseudo-folder.
    pub const ALL: FolderId = FolderId(-1);

    /// The "Uncategorized" pseudo-folder.
    pub const UNCATEGORIZED: FolderId = FolderId(0);

    /// Create an identifier from a raw integer.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Return the raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this id is one of the reserved pseudo-folders.
    pub const fn is_sentinel(self) -> bool {
        self.0 == Self::ALL.0 || self.0 == Self::UNCATEGORIZED.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FolderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl From<i64> for FolderId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<FolderId> for i64 {
    fn from(id: FolderId) -> i64 {
        id.0
    }
}

/// Serde adapter for parent references.
///
/// The REST layer writes the root as `0`. On read, `0`, `-1` and `null`
/// are all accepted as "no parent". Use with
/// `#[serde(with = "foldertree_core::types::id::parent_ref")]`.
pub mod parent_ref {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::FolderId;

    /// Serialize a parent reference, writing the root as `0`.
    pub fn serialize<S>(parent: &Option<FolderId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match parent {
            Some(id) => serializer.serialize_i64(id.0),
            None => serializer.serialize_i64(FolderId::UNCATEGORIZED.0),
        }
    }

    /// Deserialize a parent reference, mapping sentinels and `null` to root.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<FolderId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Ok(raw.map(FolderId).filter(|id| !id.is_sentinel()))
    }
}
