//! Listener identity and callback types

use std::fmt;

use anyhow::Result;

use crate::geometry::ScrollOffset;

/// Callback invoked once per broadcast tick with the latest offset
pub type ListenerFn = dyn FnMut(ScrollOffset) -> Result<()> + Send;

/// Registry key for one listener
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(String);

impl ListenerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh collision-resistant id, e.g. `fade-5b0c...`
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListenerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ListenerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
