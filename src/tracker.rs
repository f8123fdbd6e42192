//! Run orchestration
//!
//! A run walks the mirror through acquire, snapshot, sync, snapshot and
//! reconcile, and ends with an assembled [`Report`] or an error. Failures
//! while acquiring or syncing leave the run in [`RunState::Errored`] and
//! produce no report.

use std::fmt;
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::git;
use crate::report::Report;
use crate::snapshot::RepositorySnapshot;
use crate::Result;

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Uninitialized,
    Acquiring,
    SnapshottedBefore,
    Syncing,
    SnapshottedAfter,
    Reconciling,
    Reported,
    Errored,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Uninitialized => "uninitialized",
            RunState::Acquiring => "acquiring",
            RunState::SnapshottedBefore => "snapshotted-before",
            RunState::Syncing => "syncing",
            RunState::SnapshottedAfter => "snapshotted-after",
            RunState::Reconciling => "reconciling",
            RunState::Reported => "reported",
            RunState::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// Drives one check of one configured repository
pub struct Tracker {
    config: TrackerConfig,
    state: RunState,
}

impl Tracker {
    /// Create a tracker. Options are validated here, before any run starts.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: RunState::Uninitialized,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn enter(&mut self, state: RunState) {
        debug!(from = %self.state, to = %state, "Run state");
        self.state = state;
    }

    /// Perform one full check and return the report
    pub fn run(&mut self) -> Result<Report> {
        self.state = RunState::Uninitialized;
        self.check().map_err(|err| self.fail(err))
    }

    fn check(&mut self) -> Result<Report> {
        let url = self.config.repository.clone();
        let path = self.config.path.clone();

        self.enter(RunState::Acquiring);
        let mirror = git::Repository::open_or_clone(&url, &path)?;
        let before = RepositorySnapshot::capture(&mirror)?;
        self.enter(RunState::SnapshottedBefore);

        self.enter(RunState::Syncing);
        mirror.fetch_all(&url)?;
        let after = RepositorySnapshot::capture(&mirror)?;
        self.enter(RunState::SnapshottedAfter);

        self.enter(RunState::Reconciling);
        let report = Report::assemble(&mirror, &before, &after)?;
        self.enter(RunState::Reported);

        info!(
            url = %url,
            path = %path.display(),
            changed = report.changed,
            branches = report.current_branches.len(),
            tags = report.current_tags.len(),
            "Check complete"
        );

        Ok(report)
    }

    /// Read the existing mirror's state. Never clones or fetches, so a
    /// path with no mirror yet is an error.
    pub fn snapshot(&self) -> Result<RepositorySnapshot> {
        let mirror = git::Repository::open(&self.config.path)?;
        RepositorySnapshot::capture(&mirror)
    }

    fn fail(&mut self, err: crate::Error) -> crate::Error {
        warn!(state = %self.state, error = %err, "Run aborted");
        self.enter(RunState::Errored);
        err
    }
}
