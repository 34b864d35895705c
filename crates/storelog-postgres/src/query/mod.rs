//! Database query repositories for all entities in the system.
//!
//! This module contains repository implementations that provide high-level
//! database operations, encapsulating common patterns and providing
//! type-safe interfaces.
//!
//! # Pagination
//!
//! List queries page by event identifier using the cursor types in
//! [`crate::types`]; see [`ClientEventRepository::list_events`] for the
//! traversal contract.

mod client_events;

pub use client_events::ClientEventRepository;
