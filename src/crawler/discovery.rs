//! Two-stage sitemap discovery
//!
//! The root sitemap index is fetched first; its child sitemaps are filtered
//! by keyword and fetched concurrently, one task per child. Each task owns
//! its result and returns it through its join handle, so the merge needs no
//! shared accumulator.

use crate::config::DiscoveryConfig;
use crate::crawler::{filter_by_keyword, Fetcher, SelectionPattern};
use crate::{BatcherError, FetchError, PatternError};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Outcome of fetching a single child sitemap
#[derive(Debug)]
pub enum ChildOutcome {
    /// The child was fetched and parsed
    Fetched {
        /// The child sitemap URL
        sitemap: String,
        /// Page URLs listed in the child, in document order
        urls: Vec<String>,
    },

    /// The child could not be fetched, parsed, or its task did not finish
    Failed {
        /// The child sitemap URL
        sitemap: String,
        /// Why the child contributed nothing
        error: FetchError,
    },
}

impl ChildOutcome {
    /// Returns the child sitemap URL this outcome belongs to
    pub fn sitemap(&self) -> &str {
        match self {
            Self::Fetched { sitemap, .. } | Self::Failed { sitemap, .. } => sitemap,
        }
    }

    /// Returns true if the child was fetched successfully
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }
}

/// Page URLs merged from every successfully fetched child sitemap
///
/// URLs are ordered by child position, then by position inside the child.
/// Duplicates across children are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredSet {
    /// Merged page URLs
    pub urls: Vec<String>,

    /// Number of child sitemaps that contributed
    pub sitemaps_fetched: usize,

    /// Child sitemaps whose fetch failed
    pub failed_sitemaps: Vec<String>,
}

impl DiscoveredSet {
    /// Number of discovered URLs
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if nothing was discovered
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Consumes the set, returning the URLs
    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

/// Orchestrates root index resolution and child fan-out
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    root_url: String,
    keyword: String,
    index_pattern: SelectionPattern,
    leaf_pattern: SelectionPattern,
}

impl Crawler {
    /// Creates a crawler from the discovery configuration
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The fetcher shared by the root fetch and every child task
    /// * `config` - Root URL, keyword and selection patterns
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &DiscoveryConfig) -> Result<Self, PatternError> {
        Ok(Self {
            fetcher,
            root_url: config.root_url.clone(),
            keyword: config.keyword.clone(),
            index_pattern: SelectionPattern::parse(&config.index_pattern)?,
            leaf_pattern: SelectionPattern::parse(&config.leaf_pattern)?,
        })
    }

    /// Produces the discovered set for the configured root index
    ///
    /// # Returns
    ///
    /// * `Ok(DiscoveredSet)` - Everything merged from children that succeeded
    /// * `Err(BatcherError::DiscoveryRoot)` - The root index fetch failed
    pub async fn discover(&self) -> Result<DiscoveredSet, BatcherError> {
        tracing::info!("Fetching root sitemap index {}", self.root_url);

        let children = self
            .fetcher
            .fetch(&self.root_url, &self.index_pattern)
            .await
            .map_err(|source| BatcherError::DiscoveryRoot {
                url: self.root_url.clone(),
                source,
            })?;

        let targets = filter_by_keyword(&children, &self.keyword);
        tracing::info!(
            "Root index lists {} sitemaps, {} match '{}'",
            children.len(),
            targets.len(),
            self.keyword
        );

        let outcomes = self.fetch_children(targets).await;
        let discovered = merge_outcomes(outcomes);

        tracing::info!(
            "Discovered {} URLs from {} sitemaps ({} failed)",
            discovered.len(),
            discovered.sitemaps_fetched,
            discovered.failed_sitemaps.len()
        );

        Ok(discovered)
    }

    /// Fetches every child sitemap concurrently and waits for all of them
    ///
    /// One task is spawned per sitemap before any is awaited; there is no cap
    /// on in-flight fetches. Outcomes are returned in input order.
    pub async fn fetch_children(&self, sitemaps: Vec<String>) -> Vec<ChildOutcome> {
        let handles: Vec<JoinHandle<ChildOutcome>> = sitemaps
            .iter()
            .map(|sitemap| {
                let fetcher = Arc::clone(&self.fetcher);
                let pattern = self.leaf_pattern.clone();
                let sitemap = sitemap.clone();

                tokio::spawn(async move {
                    match fetcher.fetch(&sitemap, &pattern).await {
                        Ok(urls) => ChildOutcome::Fetched { sitemap, urls },
                        Err(error) => ChildOutcome::Failed { sitemap, error },
                    }
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (sitemap, handle) in sitemaps.into_iter().zip(handles) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => ChildOutcome::Failed {
                    error: FetchError::Task {
                        url: sitemap.clone(),
                        message: join_error.to_string(),
                    },
                    sitemap,
                },
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}

/// Concatenates successful child results and logs the failures
///
/// Failures are recorded in [`DiscoveredSet::failed_sitemaps`] and never
/// propagated.
pub fn merge_outcomes(outcomes: Vec<ChildOutcome>) -> DiscoveredSet {
    let mut discovered = DiscoveredSet::default();

    for outcome in outcomes {
        match outcome {
            ChildOutcome::Fetched { sitemap, urls } => {
                tracing::debug!("{} contributed {} URLs", sitemap, urls.len());
                discovered.urls.extend(urls);
                discovered.sitemaps_fetched += 1;
            }
            ChildOutcome::Failed { sitemap, error } => {
                tracing::warn!("Skipping sitemap {}: {}", sitemap, error);
                discovered.failed_sitemaps.push(sitemap);
            }
        }
    }

    discovered
}
