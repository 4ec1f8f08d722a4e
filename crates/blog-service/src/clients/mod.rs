//! Outbound HTTP clients.

pub mod users;
