use std::sync::Arc;

use reqwest::Url;

use crate::config::GatewayConfig;
use crate::identity::IdentityClient;
use crate::proxy::{ServiceClient, Upstream};

/// Shared gateway state available to the middleware and the proxy handler.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct GatewayState {
    /// Gateway configuration.
    pub config: Arc<GatewayConfig>,
    /// Client for the user service's identity endpoint (5 s timeout).
    pub identity: IdentityClient,
    /// Forwarding client for proxied requests.
    pub proxy: ServiceClient,
}

impl GatewayState {
    /// The base URL for an upstream service.
    pub fn upstream_url(&self, upstream: Upstream) -> &Url {
        match upstream {
            Upstream::UserService => &self.config.user_service_url,
            Upstream::BlogService => &self.config.blog_service_url,
        }
    }
}
