/// Pipeline stage definitions
///
/// This module defines the stages a single pipeline run moves through.
use std::fmt;

/// Represents the current stage of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    // ===== Active Stages =====
    /// Run created, nothing started yet
    Idle,

    /// Fetching the root index and child sitemaps
    Discovering,

    /// Partitioning discovered URLs into batches
    Batching,

    /// Writing the export artifact to the object store
    Exporting,

    // ===== Terminal Stages =====
    /// Artifact written and report produced
    Done,

    /// A fatal error ended the run
    Failed,
}

impl PipelineStage {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns the stage that follows this one on the success path
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Discovering),
            Self::Discovering => Some(Self::Batching),
            Self::Batching => Some(Self::Exporting),
            Self::Exporting => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    /// Returns true if moving from this stage to `to` is allowed
    ///
    /// Stages advance strictly in order; any non-terminal stage may fail.
    pub fn can_transition_to(&self, to: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == Self::Failed || self.next() == Some(to)
    }

    /// Returns the stage name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Discovering => "discovering",
            Self::Batching => "batching",
            Self::Exporting => "exporting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
