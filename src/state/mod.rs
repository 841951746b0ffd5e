//! State module for tracking pipeline progress
//!
//! # Components
//!
//! - `PipelineStage`: The stage a pipeline run is in (idle, discovering, batching, exporting, done, failed)

mod pipeline_stage;

pub use pipeline_stage::PipelineStage;
