//! Pipeline coordinator - sequences discovery, batching and export
//!
//! A run moves through `Idle → Discovering → Batching → Exporting → Done`.
//! Any fatal error moves it to `Failed` and is returned unchanged; no
//! partial report is produced.

use crate::config::Config;
use crate::crawler::{build_http_client, Crawler, Fetcher, HttpFetcher};
use crate::output::{partition, ExportArtifact, Exporter, PipelineReport};
use crate::state::PipelineStage;
use crate::storage::{open_store, ObjectStore};
use crate::{BatcherError, ConfigError};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main pipeline coordinator structure
pub struct Pipeline<'a> {
    config: &'a Config,
    crawler: Crawler,
    store: Arc<dyn ObjectStore>,
    stage: PipelineStage,
}

impl<'a> Pipeline<'a> {
    /// Creates a new pipeline
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `fetcher` - Fetcher used for the root index and every child sitemap
    /// * `store` - Destination of the export artifact
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - Pipeline in the `Idle` stage
    /// * `Err(BatcherError)` - A selection pattern in the config does not parse
    pub fn new(
        config: &'a Config,
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn ObjectStore>,
    ) -> Result<Self, BatcherError> {
        let crawler = Crawler::new(fetcher, &config.discovery).map_err(ConfigError::from)?;

        Ok(Self {
            config,
            crawler,
            store,
            stage: PipelineStage::Idle,
        })
    }

    /// Returns the current stage
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Runs the pipeline once
    ///
    /// This method:
    /// 1. Discovers page URLs from the root index and its child sitemaps
    /// 2. Partitions them into batches
    /// 3. Exports the batches as one artifact
    /// 4. Reports the object key, bucket and batch count
    pub async fn run(&mut self) -> Result<PipelineReport, BatcherError> {
        let start_time = Instant::now();

        match self.execute().await {
            Ok(report) => {
                tracing::info!(
                    "Pipeline completed in {:?}: {} batches in {}/{}",
                    start_time.elapsed(),
                    report.batch_count,
                    report.bucket_name,
                    report.object_key
                );
                Ok(report)
            }
            Err(e) => {
                if self.stage.can_transition_to(PipelineStage::Failed) {
                    tracing::error!("Pipeline failed while {}: {}", self.stage, e);
                    self.stage = PipelineStage::Failed;
                }
                Err(e)
            }
        }
    }

    async fn execute(&mut self) -> Result<PipelineReport, BatcherError> {
        let config = self.config;

        self.advance(PipelineStage::Discovering)?;
        let discovered = self.crawler.discover().await?;

        self.advance(PipelineStage::Batching)?;
        let batch_size = NonZeroUsize::new(config.batching.batch_size)
            .ok_or_else(|| ConfigError::Validation("batch_size must be >= 1".to_string()))?;
        let artifact = ExportArtifact {
            batches: partition(&discovered.urls, batch_size),
        };
        tracing::info!(
            "Partitioned {} URLs into {} batches of up to {}",
            discovered.len(),
            artifact.batches.len(),
            batch_size
        );

        self.advance(PipelineStage::Exporting)?;
        let exporter = Exporter::new(self.store.as_ref(), &config.storage.bucket);
        let object_key = exporter.export(&artifact).await?;
        let bucket_name = exporter.bucket().to_string();

        self.advance(PipelineStage::Done)?;

        Ok(PipelineReport {
            object_key,
            bucket_name,
            batch_count: artifact.batches.len(),
        })
    }

    fn advance(&mut self, to: PipelineStage) -> Result<(), BatcherError> {
        if !self.stage.can_transition_to(to) {
            return Err(BatcherError::InvalidTransition {
                from: self.stage,
                to,
            });
        }
        tracing::debug!("Pipeline stage {} -> {}", self.stage, to);
        self.stage = to;
        Ok(())
    }
}

/// Runs the pipeline once with the HTTP fetcher and the configured store
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(PipelineReport)` - The artifact was written
/// * `Err(BatcherError)` - Startup, root discovery, encoding or storage failed
///
/// # Example
///
/// ```no_run
/// use sitemap_batcher::config::load_config;
/// use sitemap_batcher::pipeline::run_pipeline;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let report = run_pipeline(&config).await?;
/// println!("{} batches written to {}", report.batch_count, report.object_key);
/// # Ok(())
/// # }
/// ```
pub async fn run_pipeline(config: &Config) -> Result<PipelineReport, BatcherError> {
    let timeout = Duration::from_secs(config.discovery.fetch_timeout_secs);
    let client = build_http_client(&config.user_agent, timeout)?;

    let store = open_store(&config.storage, &client)?;
    let fetcher = Arc::new(HttpFetcher::new(client));

    let mut pipeline = Pipeline::new(config, fetcher, store)?;
    pipeline.run().await
}
