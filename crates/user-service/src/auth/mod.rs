//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//!
//! Session tokens themselves live in `pilcrow-session`; this module only
//! covers credentials.

pub mod password;
