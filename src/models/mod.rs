//! Core data models for the contest tracker.

mod contest;
mod platform;
mod record;
mod status;

pub use contest::*;
pub use platform::*;
pub use record::*;
pub use status::*;
