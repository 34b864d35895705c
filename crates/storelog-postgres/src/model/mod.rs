//! Database models for all entities in the system.

mod client_event;

pub use client_event::{ClientEvent, NewClientEvent};
