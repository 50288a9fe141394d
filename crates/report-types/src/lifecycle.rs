//! Report generation lifecycle
//!
//! `draft → generating → ready`, or `generating → error`. The editor drives
//! the transitions; a body sent for compilation may carry any of them,
//! `generating` included.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a report is in its generation lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Draft,
    Generating,
    Ready,
    Error,
}

/// Invalid lifecycle transition
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Cannot finish generation from status '{0}'")]
    NotGenerating(ReportStatus),
}

impl ReportStatus {
    /// Enter `generating`. A snapshot already in `generating` stays there.
    pub fn begin_generation(self) -> Self {
        ReportStatus::Generating
    }

    /// Status reached when a generation ends
    pub fn outcome(succeeded: bool) -> Self {
        if succeeded {
            ReportStatus::Ready
        } else {
            ReportStatus::Error
        }
    }

    /// Leave `generating` depending on whether assembly completed
    pub fn finish(self, succeeded: bool) -> Result<Self, LifecycleError> {
        match self {
            ReportStatus::Generating => Ok(Self::outcome(succeeded)),
            other => Err(LifecycleError::NotGenerating(other)),
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Draft => write!(f, "draft"),
            ReportStatus::Generating => write!(f, "generating"),
            ReportStatus::Ready => write!(f, "ready"),
            ReportStatus::Error => write!(f, "error"),
        }
    }
}
