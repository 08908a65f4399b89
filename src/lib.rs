//! pipeline-dag - structural check for editor pipelines
//!
//! ## Module Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        DOMAIN MODEL                          │
//! │  ast/       JSON → Rust types (Pipeline, Node, Edge)         │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                            CORE                              │
//! │  dag/       AdjacencyList, CycleDetector, PipelineSummary    │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         TRANSPORT                            │
//! │  server/    axum router, CORS, detection deadline            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`ast`] | Payload parsing → `Pipeline`, `Node`, `Edge` (extra fields passed through) |
//! | [`dag`] | Adjacency list + explicit-stack three-color DFS |
//! | [`server`] | `GET /`, `POST /pipelines/parse` |
//! | [`config`] | Server settings: file, env, CLI flags |
//! | [`error`] | Error types with codes and fix suggestions |

// ═══════════════════════════════════════════════════════════════
// DOMAIN MODEL
// ═══════════════════════════════════════════════════════════════
pub mod ast;

// ═══════════════════════════════════════════════════════════════
// CORE - pure, per-call graph analysis
// ═══════════════════════════════════════════════════════════════
pub mod dag;

// ═══════════════════════════════════════════════════════════════
// TRANSPORT
// ═══════════════════════════════════════════════════════════════
pub mod server;

// ═══════════════════════════════════════════════════════════════
// CROSS-CUTTING - Error handling, configuration
// ═══════════════════════════════════════════════════════════════
pub mod config;
pub mod error;

// ═══════════════════════════════════════════════════════════════
// PUBLIC API RE-EXPORTS
// ═══════════════════════════════════════════════════════════════

pub use ast::{Edge, Node, Pipeline};
pub use config::ServerConfig;
pub use dag::{detect, find_cycle, AdjacencyList, CycleDetector, PipelineSummary};
pub use error::{FixSuggestion, PipelineError, Result};
pub use server::{router, Server};
