//! Cache Entry Module
//!
//! Defines search IDs, resource references, result sets and the entries that
//! pair them inside the paging cache.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// == Search ID ==
/// Opaque token identifying one stored search result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchId(String);

impl SearchId {
    /// Issues a fresh random search ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SearchId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SearchId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// == Resource Reference ==
/// A relative FHIR reference such as `Patient/123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRef(String);

impl ResourceRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the reference into `(resource_type, id)`.
    ///
    /// Returns None unless both parts are present and non-empty.
    pub fn parts(&self) -> Option<(&str, &str)> {
        let (resource_type, id) = self.0.split_once('/')?;
        if resource_type.is_empty() || id.is_empty() || id.contains('/') {
            return None;
        }
        Some((resource_type, id))
    }

    /// Returns the resource type part, e.g. `Patient`.
    pub fn resource_type(&self) -> Option<&str> {
        self.parts().map(|(resource_type, _)| resource_type)
    }

    /// Returns the logical id part, e.g. `123`.
    pub fn id(&self) -> Option<&str> {
        self.parts().map(|(_, id)| id)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// == Result Set ==
/// The full, unpaged output of one search.
///
/// Resources live behind an `Arc<[ResourceRef]>` so a reader can take a
/// snapshot under the lock and slice it after the lock is released.
#[derive(Debug, Clone)]
pub struct ResultSet {
    resources: Arc<[ResourceRef]>,
    /// Creation time, for debugging only. Insertion order drives eviction.
    pub created_at: DateTime<Utc>,
}

impl ResultSet {
    pub fn new(resources: Vec<ResourceRef>) -> Self {
        Self {
            resources: resources.into(),
            created_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Shared snapshot of the resources.
    pub fn snapshot(&self) -> Arc<[ResourceRef]> {
        Arc::clone(&self.resources)
    }
}

impl From<Vec<ResourceRef>> for ResultSet {
    fn from(resources: Vec<ResourceRef>) -> Self {
        Self::new(resources)
    }
}

// == Cache Entry ==
/// A stored result set together with its search ID and insertion sequence.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub id: SearchId,
    pub result_set: ResultSet,
    /// Monotonic insertion counter
    pub sequence: u64,
}

impl CacheEntry {
    pub fn new(id: SearchId, result_set: ResultSet, sequence: u64) -> Self {
        Self {
            id,
            result_set,
            sequence,
        }
    }
}
