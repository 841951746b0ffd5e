//! Crawler module for sitemap fetching and URL discovery
//!
//! This module contains the discovery stage of the pipeline, including:
//! - Element selection patterns and XML text extraction
//! - The fetcher interface and its HTTP implementation
//! - Keyword filtering of child sitemaps
//! - Concurrent fan-out over child sitemaps and the merge of their results

mod discovery;
mod fetcher;
mod filter;
mod parser;
mod pattern;

pub use discovery::{merge_outcomes, ChildOutcome, Crawler, DiscoveredSet};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use filter::filter_by_keyword;
pub use parser::select_text;
pub use pattern::SelectionPattern;
