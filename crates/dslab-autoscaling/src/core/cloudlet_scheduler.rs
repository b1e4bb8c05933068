//! Scheduling disciplines used by VMs to share their cores among cloudlets.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Cloudlet scheduling discipline of a VM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CloudletScheduler {
    TimeShared,
    SpaceShared,
    CompletelyFair,
}

impl CloudletScheduler {
    /// Discipline used when config has no scheduler selector at all.
    pub const ABSENT_DEFAULT: CloudletScheduler = CloudletScheduler::SpaceShared;

    /// Discipline used when the selector is present but is not recognized.
    pub const UNRECOGNIZED_DEFAULT: CloudletScheduler = CloudletScheduler::CompletelyFair;

    /// Resolves the discipline by selector literal.
    ///
    /// Note that the two defaults differ: a missing selector gives space-shared scheduling
    /// while an unknown one (e.g. a typo) gives completely fair scheduling.
    pub fn resolve(selector: Option<&str>) -> Self {
        match selector {
            Some(selector) => Self::from_selector(selector),
            None => Self::ABSENT_DEFAULT,
        }
    }

    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "time" => CloudletScheduler::TimeShared,
            "space" => CloudletScheduler::SpaceShared,
            _ => Self::UNRECOGNIZED_DEFAULT,
        }
    }
}

impl Display for CloudletScheduler {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            CloudletScheduler::TimeShared => write!(f, "time_shared"),
            CloudletScheduler::SpaceShared => write!(f, "space_shared"),
            CloudletScheduler::CompletelyFair => write!(f, "completely_fair"),
        }
    }
}
