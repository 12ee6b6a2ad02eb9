//! Route handlers, one module per resource.

pub mod bookmarks;
pub mod contests;
pub mod health;
