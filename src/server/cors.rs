//! Single-origin CORS policy
//!
//! The editor front-end is the only allowed origin. The origin is matched
//! against each request's `Origin` header, so other callers get no
//! `Access-Control-Allow-*` headers at all. Credentials are allowed, so
//! methods and headers are mirrored from the preflight request instead of
//! using `*`.

use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::ServerConfig;
use crate::error::Result;

pub fn layer(config: &ServerConfig) -> Result<CorsLayer> {
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([config.origin_header()?]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
