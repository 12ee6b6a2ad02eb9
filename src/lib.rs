//! # Contest Tracker
//!
//! Merges upcoming, running and finished programming contests from CodeChef,
//! Codeforces and LeetCode into one ordered listing.
//!
//! ## Architecture
//!
//! - **models**: Contest records, platforms and status buckets
//! - **normalize**: Time resolution, classification, ordering and search
//! - **fetch**: Upstream contest sources
//! - **listing**: Source selection feeding the normalization pipeline
//! - **bookmarks**: Cookie-backed bookmark snapshots
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod bookmarks;
pub mod config;
pub mod fetch;
pub mod listing;
pub mod models;
pub mod normalize;

pub use models::*;
