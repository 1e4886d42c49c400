use crate::error::GraftError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// Opaque, numeric-looking identifier of a workflow node.
///
/// Ids arrive from the API either as JSON strings or as integers. Both are
/// accepted and always written back as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value of this id, if it is numeric at all.
    pub fn numeric(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }

    /// All digits, but too large for `u64`.
    pub fn is_oversized_numeric(&self) -> bool {
        let digits = self.0.trim();
        !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && self.numeric().is_none()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct NodeIdVisitor;

impl<'de> Visitor<'de> for NodeIdVisitor {
    type Value = NodeId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a node id as a string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeId, E> {
        Ok(NodeId(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<NodeId, E> {
        Ok(NodeId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeId, E> {
        Ok(NodeId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeId, E> {
        Ok(NodeId(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeIdVisitor)
    }
}

/// Hands out fresh node ids, strictly increasing from a seed.
///
/// Seeded from the largest numeric id present in a document so that new
/// nodes never collide with existing ones. Once the `u64` range is used up
/// every further allocation fails.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: Option<u64>,
}

impl IdAllocator {
    pub fn starting_after(max_id: u64) -> Self {
        Self {
            next: max_id.checked_add(1),
        }
    }

    /// An allocator with nothing left to hand out.
    pub fn exhausted() -> Self {
        Self { next: None }
    }

    pub fn allocate(&mut self) -> Result<NodeId, GraftError> {
        let id = self.next.ok_or(GraftError::IdSpaceExhausted)?;
        self.next = id.checked_add(1);
        Ok(NodeId::from(id))
    }
}
