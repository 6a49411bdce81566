//! Sink names
//!
//! Registration happens once, but a sink's name is cloned into every handle,
//! log event, and metrics label that mentions the sink, so the text lives
//! behind `Arc<str>` and a clone only bumps a refcount.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// The unique name of a registered sink.
///
/// Names arrive as `&str` at the registration call sites and are never
/// assembled from owned strings afterwards, so the only constructors are
/// borrowing ones. Equality and hashing go through the underlying text,
/// which keeps a `HashMap<SinkId, _>` probeable with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SinkId(Arc<str>);

impl SinkId {
    /// Create a SinkId from a registration-time name.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SinkId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// Borrow<str> must agree with the derived Hash (both delegate to the inner
// str) so registries can be probed with &str.
impl Borrow<str> for SinkId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for SinkId {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Serialized as the bare name, so a host's config layer can reference sinks
// as plain strings.
impl Serialize for SinkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SinkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}
