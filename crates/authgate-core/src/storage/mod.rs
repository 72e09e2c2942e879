//! Storage traits for client data.
//!
//! The endpoints only read client registrations. Persistent backends implement
//! [`ClientDirectory`]; [`MemoryClientDirectory`] covers static deployments
//! seeded from configuration.

pub mod client;
pub mod memory;

pub use client::ClientDirectory;
pub use memory::MemoryClientDirectory;
