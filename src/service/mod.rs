//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and search calls into engine-lifecycle APIs.
//! - Keep embedding layers decoupled from storage details.

pub mod index_service;
