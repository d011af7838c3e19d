//! FHIR Paging - search result paging for FHIR servers
//!
//! Keeps a bounded number of search result sets in memory, evicts them in
//! FIFO order, and serves offset/count pages by search ID.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::PagingCache;
pub use config::Config;
