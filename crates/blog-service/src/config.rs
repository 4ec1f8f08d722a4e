use reqwest::Url;

/// Blog service configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct BlogServiceConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8002`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory where article images are written and served from.
    pub articles_dir: String,
    /// Public gateway base URL; author enrichment goes through the gateway,
    /// never directly to the user service.
    pub gateway_url: Url,
    /// Timeout for the enrichment call in seconds (default: `3`).
    pub enrichment_timeout_secs: u64,
}

impl BlogServiceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `8002`                  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `ARTICLE_IMAGE_DIR`       | `/app/static/articles`  |
    /// | `API_GATEWAY_URL`         | `http://localhost:8000` |
    /// | `ENRICHMENT_TIMEOUT_SECS` | `3`                     |
    ///
    /// # Panics
    ///
    /// Panics if `API_GATEWAY_URL` is not a valid URL -- misconfiguration
    /// should fail at startup, not on the first enrichment call.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8002".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let articles_dir =
            std::env::var("ARTICLE_IMAGE_DIR").unwrap_or_else(|_| "/app/static/articles".into());

        let gateway_url: Url = std::env::var("API_GATEWAY_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into())
            .parse()
            .expect("API_GATEWAY_URL must be a valid URL");

        let enrichment_timeout_secs: u64 = std::env::var("ENRICHMENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("ENRICHMENT_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            request_timeout_secs,
            articles_dir,
            gateway_url,
            enrichment_timeout_secs,
        }
    }
}
