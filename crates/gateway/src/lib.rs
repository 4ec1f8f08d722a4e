//! Pilcrow API gateway library.
//!
//! The single public edge of the system: validates sessions for every
//! mutating request (by calling the user service's identity endpoint with
//! the caller's cookie), injects the resolved `X-User-Id` header, and
//! reverse-proxies requests to the user and blog services by path prefix.

pub mod config;
pub mod identity;
pub mod middleware;
pub mod proxy;
pub mod response;
pub mod state;
