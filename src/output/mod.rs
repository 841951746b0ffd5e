//! Output module for batching and exporting discovered URLs
//!
//! This module handles:
//! - Partitioning discovered URLs into fixed-size batches
//! - Encoding the batches as the JSON export artifact
//! - Writing the artifact under a time-derived key
//! - The report handed back to the caller

mod batches;
mod export;
mod report;

pub use batches::{partition, Batch, DEFAULT_BATCH_SIZE};
pub use export::{object_key_for, ExportArtifact, Exporter};
pub use report::PipelineReport;
