use std::num::NonZeroUsize;

/// An ordered chunk of page URLs handed downstream as one unit of work
pub type Batch = Vec<String>;

/// Default number of URLs per batch
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(25) {
    Some(size) => size,
    None => unreachable!(),
};

/// Partitions `urls` into contiguous batches of at most `size` URLs
///
/// Every batch except the last holds exactly `size` URLs; concatenating the
/// batches reproduces `urls`. An empty input yields no batches.
///
/// # Example
///
/// ```
/// use sitemap_batcher::output::partition;
/// use std::num::NonZeroUsize;
///
/// let urls: Vec<String> = (0..26).map(|i| i.to_string()).collect();
/// let batches = partition(&urls, NonZeroUsize::new(25).unwrap());
/// assert_eq!(batches.len(), 2);
/// assert_eq!(batches[1], vec!["25".to_string()]);
/// ```
pub fn partition(urls: &[String], size: NonZeroUsize) -> Vec<Batch> {
    urls.chunks(size.get()).map(<[String]>::to_vec).collect()
}
