//! Storage layer for the playoff league
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: CRUD operations and the `LineupStore` implementation

pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::LeagueDatabase;
