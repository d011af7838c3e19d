//! Request DTOs for the paging server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::cache::ResourceRef;

/// Request body for storing a search result set (POST /search)
///
/// # Fields
/// - `resources`: Relative references of every match, in result order
/// - `_count`: Optional size of the first page
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// Full, unpaged list of matches
    pub resources: Vec<String>,
    /// Optional first page size
    #[serde(default, rename = "_count")]
    pub count: Option<i64>,
}

impl SearchRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        self.resources
            .iter()
            .position(|reference| ResourceRef::new(reference.as_str()).parts().is_none())
            .map(|index| {
                format!(
                    "resources[{}] \"{}\" is not a relative reference of the form Type/id",
                    index, self.resources[index]
                )
            })
    }

    /// Converts the validated references into cache values.
    pub fn into_resources(self) -> Vec<ResourceRef> {
        self.resources.into_iter().map(ResourceRef::new).collect()
    }
}

/// Query string of a page request (GET /?_getpages=...)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetPagesQuery {
    /// Search ID issued when the result set was stored
    #[serde(default, rename = "_getpages")]
    pub search_id: Option<String>,
    /// Index of the first resource on the page
    #[serde(default, rename = "_getpagesoffset")]
    pub offset: Option<i64>,
    /// Page size
    #[serde(default, rename = "_count")]
    pub count: Option<i64>,
}
