//! Core utilities shared by the stat providers
//!
//! - `cache`: single-flight LRU cache for provider responses
//! - `http`: reqwest client construction and JSON fetching

pub mod cache;
pub mod http;

// Re-export commonly used items for convenience
pub use cache::ResponseCache;
pub use http::{build_client, get_json, DEFAULT_TIMEOUT_SECS};
