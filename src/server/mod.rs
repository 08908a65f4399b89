//! Server Module - HTTP transport around the DAG check
//!
//! Contains:
//! - `routes`: `GET /` liveness and `POST /pipelines/parse`
//! - `cors`: single-origin CORS policy
//!
//! Routes:
//!
//! | Method | Path               | Response                                   |
//! |--------|--------------------|--------------------------------------------|
//! | GET    | `/`                | `{"Ping": "Pong"}`                         |
//! | POST   | `/pipelines/parse` | `{"num_nodes", "num_edges", "is_dag"}`     |

mod cors;
mod routes;

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{PipelineError, Result};

pub use routes::summarize;

/// Per-router state shared by handlers (read-only)
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    /// Deadline for one cycle detection
    pub request_timeout: Duration,
}

/// Build the router for `config`
pub fn router(config: &ServerConfig) -> Result<Router> {
    let state = AppState {
        request_timeout: config.request_timeout(),
    };

    Ok(Router::new()
        .route("/", get(routes::ping))
        .route("/pipelines/parse", post(routes::parse_pipeline))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors::layer(config)?)
        .layer(TraceLayer::new_for_http()))
}

/// A bound, not yet running, HTTP server
pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl Server {
    /// Validate `config`, build the router and bind the listener
    pub async fn bind(config: &ServerConfig) -> Result<Self> {
        config.validate()?;
        let app = router(config)?;

        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| PipelineError::BindError {
                addr: addr.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(
            addr = %addr,
            allowed_origin = %config.allowed_origin,
            request_timeout_ms = config.request_timeout_ms,
            "server bound"
        );

        Ok(Self { listener, app })
    }

    /// Actual address (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` completes, then drain in-flight requests
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(addr = %self.local_addr()?, "listening");
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
