//! graphqa-core: Shared types, configuration, and error handling.
//!
//! This crate provides the foundational types used across the workspace:
//! - Schema descriptors (node and edge types) and the grounding-text renderer
//! - Query results and their flat text serialization
//! - Pipeline outcomes, judge scores, and evaluation records
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod result;
pub mod schema;
pub mod types;

pub use error::CoreError;
pub use result::{AnsweredQuery, QueryResult, Row};
pub use schema::{EdgeType, GraphSchema, NodeType, Property};
pub use types::{EvaluationRecord, Judgement, PipelineOutcome, Score, ScoreLabel, NOT_AVAILABLE};
