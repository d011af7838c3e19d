//! Request and Response models for the paging server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{GetPagesQuery, SearchRequest};
pub use responses::{
    Bundle, BundleEntry, BundleLink, HealthResponse, OperationOutcome, OutcomeIssue,
    StatsResponse,
};
