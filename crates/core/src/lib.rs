//! Shared domain primitives for the pilcrow services.
//!
//! This crate holds the pieces every service agrees on: id and timestamp
//! aliases, the cross-service [`error::CoreError`] taxonomy, and the pure
//! naming helpers (placeholder author names, upload filenames).
//!
//! It has no I/O dependencies so the gateway, user service, and blog service
//! can all depend on it without dragging in a database or HTTP stack.

pub mod error;
pub mod naming;
pub mod types;
