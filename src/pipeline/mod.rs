//! Pipeline module: one discovery → batching → export run
//!
//! This is the main entry point used by the binary. A run:
//! 1. Fetches the root sitemap index and the matching child sitemaps
//! 2. Partitions the discovered URLs into batches
//! 3. Writes the batches to the configured object store
//! 4. Reports where the artifact went

mod coordinator;

pub use coordinator::{run_pipeline, Pipeline};
