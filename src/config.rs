//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_CAPACITY;

const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_MAX_PAGE_SIZE: usize = 100;
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DESCRIPTION: &str = "GPSoC IM2 Server";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of search result sets kept for paging
    pub paging_capacity: usize,
    /// Page size used when a request does not give `_count`
    pub default_page_size: usize,
    /// Upper bound applied to a requested `_count`
    pub max_page_size: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL used when building paging links
    pub base_url: String,
    /// Implementation description reported by the health endpoint
    pub description: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PAGING_CAPACITY` - Retained search result sets (default: 10)
    /// - `DEFAULT_PAGE_SIZE` - Page size without `_count` (default: 10)
    /// - `MAX_PAGE_SIZE` - Largest page served (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SERVER_BASE_URL` - Base for paging links (default: `http://localhost:{port}`)
    /// - `SERVER_DESCRIPTION` - Implementation description (default: "GPSoC IM2 Server")
    ///
    /// Zero or unparseable numbers fall back to their defaults.
    pub fn from_env() -> Self {
        let server_port = positive_var("SERVER_PORT").unwrap_or(DEFAULT_PORT);
        let default_page_size = positive_var("DEFAULT_PAGE_SIZE").unwrap_or(DEFAULT_PAGE_SIZE);
        let max_page_size = positive_var("MAX_PAGE_SIZE")
            .unwrap_or(DEFAULT_MAX_PAGE_SIZE)
            .max(default_page_size);

        Self {
            paging_capacity: positive_var("PAGING_CAPACITY").unwrap_or(DEFAULT_CAPACITY),
            default_page_size,
            max_page_size,
            server_port,
            base_url: env::var("SERVER_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| local_base_url(server_port)),
            description: env::var("SERVER_DESCRIPTION")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paging_capacity: DEFAULT_CAPACITY,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            server_port: DEFAULT_PORT,
            base_url: local_base_url(DEFAULT_PORT),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

fn positive_var<T>(name: &str) -> Option<T>
where
    T: FromStr + PartialEq + Default,
{
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .filter(|v| *v != T::default())
}

fn local_base_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}
