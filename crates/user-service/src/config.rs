/// User service configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8001`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory where profile images are written and served from.
    pub profiles_dir: String,
}

impl UserServiceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                |
    /// |------------------------|------------------------|
    /// | `HOST`                 | `0.0.0.0`              |
    /// | `PORT`                 | `8001`                 |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                   |
    /// | `PROFILE_IMAGE_DIR`    | `/app/static/profiles` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let profiles_dir =
            std::env::var("PROFILE_IMAGE_DIR").unwrap_or_else(|_| "/app/static/profiles".into());

        Self {
            host,
            port,
            request_timeout_secs,
            profiles_dir,
        }
    }
}
