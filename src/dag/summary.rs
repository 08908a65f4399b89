//! PipelineSummary - structural metadata reported for a pipeline

use serde::{Deserialize, Serialize};

use crate::ast::Pipeline;

use super::cycle;

/// Response body of `POST /pipelines/parse`
///
/// Counts are the raw input lengths, before dangling edges or duplicate
/// node ids are discarded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineSummary {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
}

impl PipelineSummary {
    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        Self {
            num_nodes: pipeline.num_nodes(),
            num_edges: pipeline.num_edges(),
            is_dag: cycle::detect(&pipeline.nodes, &pipeline.edges),
        }
    }
}
