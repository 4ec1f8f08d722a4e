//! Pilcrow blog service library.
//!
//! Owns blog articles: CRUD with owner enforcement, per-article image
//! uploads, and best-effort author-name enrichment through the gateway.
//! Sessions are resolved directly against the session store from the
//! `session_id` cookie; the gateway's `X-User-Id` header is not consumed.

pub mod clients;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;
