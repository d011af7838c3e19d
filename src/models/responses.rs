//! Response DTOs for the paging server API
//!
//! Defines the structure of outgoing HTTP response bodies. Pages and errors
//! use the FHIR Bundle and OperationOutcome shapes.

use serde::Serialize;

use crate::cache::{Page, PagingStats};

/// A link in a Bundle (`self`, `next`, `previous`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleLink {
    pub relation: String,
    pub url: String,
}

/// A Bundle entry pointing at one matching resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleEntry {
    #[serde(rename = "fullUrl")]
    pub full_url: String,
}

/// Searchset Bundle carrying one page of a stored result set
#[derive(Debug, Clone, Serialize)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,
    /// Search ID the page was read from
    pub id: String,
    #[serde(rename = "type")]
    pub bundle_type: &'static str,
    /// Length of the whole result set
    pub total: usize,
    pub link: Vec<BundleLink>,
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Builds a searchset Bundle with paging links relative to `base_url`.
    pub fn searchset(page: &Page, base_url: &str) -> Self {
        let page_url = |offset: usize| {
            format!(
                "{}?_getpages={}&_getpagesoffset={}&_count={}&_bundletype=searchset",
                base_url, page.search_id, offset, page.count
            )
        };

        let mut link = vec![BundleLink {
            relation: "self".to_string(),
            url: page_url(page.offset),
        }];
        if let Some(next) = page.next_offset() {
            link.push(BundleLink {
                relation: "next".to_string(),
                url: page_url(next),
            });
        }
        if let Some(previous) = page.previous_offset() {
            link.push(BundleLink {
                relation: "previous".to_string(),
                url: page_url(previous),
            });
        }

        let entry = page
            .resources
            .iter()
            .map(|reference| BundleEntry {
                full_url: format!("{}/{}", base_url, reference),
            })
            .collect();

        Self {
            resource_type: "Bundle",
            id: page.search_id.to_string(),
            bundle_type: "searchset",
            total: page.total,
            link,
            entry,
        }
    }

    /// Returns the URL of the link with the given relation.
    pub fn link_url(&self, relation: &str) -> Option<&str> {
        self.link
            .iter()
            .find(|link| link.relation == relation)
            .map(|link| link.url.as_str())
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of result sets stored
    pub stores: u64,
    /// Number of successful page reads
    pub hits: u64,
    /// Number of page reads for unknown or evicted searches
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of retained result sets
    pub total_entries: usize,
    /// Maximum number of retained result sets
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<PagingStats> for StatsResponse {
    fn from(stats: PagingStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stores: stats.stores,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            capacity: stats.capacity,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Implementation description
    pub server: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(server: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            server: server.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// One issue of an OperationOutcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeIssue {
    pub severity: String,
    pub code: String,
    pub diagnostics: String,
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutcome {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,
    pub issue: Vec<OutcomeIssue>,
}

impl OperationOutcome {
    /// Creates an OperationOutcome with a single error issue
    pub fn error(code: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self {
            resource_type: "OperationOutcome",
            issue: vec![OutcomeIssue {
                severity: "error".to_string(),
                code: code.into(),
                diagnostics: diagnostics.into(),
            }],
        }
    }
}
