use crate::types::DbId;

/// Domain-level error taxonomy shared by every pilcrow service.
///
/// Each service maps these onto HTTP statuses in its own `AppError`; the
/// variants cover exactly the failure modes the services surface to callers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No session cookie was presented on an endpoint that requires one.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A session cookie was presented but the token is not in the store
    /// (expired or never existed).
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// Login failed: unknown email or password hash mismatch. Deliberately
    /// does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is authenticated but does not own the target entity.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An upstream service could not be reached (connection refused, timeout).
    #[error("{0} is unavailable")]
    UpstreamUnavailable(&'static str),

    /// An upstream service answered with a body we could not interpret.
    #[error("Invalid response from {0}")]
    UpstreamInvalid(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}
