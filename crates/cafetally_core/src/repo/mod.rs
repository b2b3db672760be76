//! Persistence adapter for named storage slots.
//!
//! # Responsibility
//! - Define the `SlotStore` contract the service layer persists through.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Stores deal in opaque strings; (de)serialization belongs to callers.

pub mod slot_repo;
