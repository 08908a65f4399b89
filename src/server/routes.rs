//! Route handlers

use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::ast::Pipeline;
use crate::dag::PipelineSummary;
use crate::error::{PipelineError, Result};

use super::AppState;

/// `GET /`
pub async fn ping() -> Json<Value> {
    Json(json!({ "Ping": "Pong" }))
}

/// `POST /pipelines/parse`
pub async fn parse_pipeline(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Pipeline>, JsonRejection>,
) -> Result<Json<PipelineSummary>> {
    let Json(pipeline) = payload?;
    let summary = summarize(pipeline, state.request_timeout).await?;
    Ok(Json(summary))
}

/// Run the DAG check on the blocking pool under `deadline`.
///
/// On timeout the request fails with `DetectionTimeout`; the detached worker
/// runs to completion on its own and its result is discarded.
pub async fn summarize(pipeline: Pipeline, deadline: Duration) -> Result<PipelineSummary> {
    let worker = tokio::task::spawn_blocking(move || PipelineSummary::from_pipeline(&pipeline));

    let summary = match tokio::time::timeout(deadline, worker).await {
        Ok(Ok(summary)) => summary,
        Ok(Err(join_error)) => {
            return Err(PipelineError::DetectionAborted {
                reason: join_error.to_string(),
            })
        }
        Err(_) => {
            return Err(PipelineError::DetectionTimeout {
                timeout_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
            })
        }
    };

    tracing::info!(
        num_nodes = summary.num_nodes,
        num_edges = summary.num_edges,
        is_dag = summary.is_dag,
        "pipeline parsed"
    );
    Ok(summary)
}
