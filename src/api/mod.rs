//! API Module
//!
//! HTTP handlers and routing for the paging server REST API.
//!
//! # Endpoints
//! - `POST /search` - Store a search result set
//! - `GET /?_getpages={id}&_getpagesoffset={n}&_count={m}` - Read a page
//! - `GET /stats` - Get paging cache statistics
//! - `GET /health` - Health check endpoint

pub mod access_log;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
