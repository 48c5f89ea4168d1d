//! Domain model for indexed records.
//!
//! # Responsibility
//! - Define the canonical caller-facing record shape submitted for indexing.
//! - Keep the field representation schema-less so any record source can
//!   feed the index without a fixed struct.
//!
//! # Invariants
//! - Every record is identified by a caller-owned `ObjectId`, unique
//!   within its index.
//! - Field order is preserved from submission through serialization.

pub mod record;
