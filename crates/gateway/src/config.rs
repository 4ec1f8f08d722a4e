use reqwest::Url;

/// Gateway configuration loaded from environment variables.
///
/// Upstream base URLs are parsed and validated here, at startup; a typo in a
/// service URL kills the process immediately instead of surfacing as a 503
/// on the first forwarded request.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Inbound HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// User service base URL.
    pub user_service_url: Url,
    /// Blog service base URL.
    pub blog_service_url: Url,
    /// Timeout for the identity call to the user service (default: `5`).
    pub auth_timeout_secs: u64,
    /// Timeout for proxied requests to either service (default: `30`).
    pub proxy_timeout_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `8000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `USER_SERVICE_URL`     | `http://localhost:8001` |
    /// | `BLOG_SERVICE_URL`     | `http://localhost:8002` |
    /// | `AUTH_TIMEOUT_SECS`    | `5`                     |
    /// | `PROXY_TIMEOUT_SECS`   | `30`                    |
    ///
    /// # Panics
    ///
    /// Panics if either service URL is not a valid URL.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let user_service_url: Url = std::env::var("USER_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8001".into())
            .parse()
            .expect("USER_SERVICE_URL must be a valid URL");

        let blog_service_url: Url = std::env::var("BLOG_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8002".into())
            .parse()
            .expect("BLOG_SERVICE_URL must be a valid URL");

        let auth_timeout_secs: u64 = std::env::var("AUTH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("AUTH_TIMEOUT_SECS must be a valid u64");

        let proxy_timeout_secs: u64 = std::env::var("PROXY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("PROXY_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            user_service_url,
            blog_service_url,
            auth_timeout_secs,
            proxy_timeout_secs,
        }
    }
}
