//! Pilcrow user service library.
//!
//! Owns user records and the session lifecycle: sessions are created on
//! register/login, deleted on logout, and resolved on every authenticated
//! request by reading the `session_id` cookie against the session store.
//! Exposes the building blocks (config, state, error handling, routes) so
//! integration tests and the binary entrypoint can both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;
