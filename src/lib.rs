//! refwatch - Remote Repository Change Tracker
//!
//! Keeps a bare mirror of a remote git repository and, on every check,
//! reports what changed since the previous one: new, removed and moved
//! branches and tags, the commits each branch gained, and line-level diff
//! statistics.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Scheduler (tokio)                          │
//! │        interval ticks + upstream triggers → one run at a time   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                        Tracker                            │  │
//! │  │  acquire → snapshot → sync → snapshot → reconcile         │  │
//! │  └──────────────┬───────────────────────────┬────────────────┘  │
//! │                 │                           │                   │
//! │                 ▼                           ▼                   │
//! │  ┌─────────────────────────┐  ┌──────────────────────────────┐  │
//! │  │  RepositorySnapshot     │  │  Reconciler + CommitWindow   │  │
//! │  │  (branches, tags,       │  │  (added / removed / updated, │  │
//! │  │   latest commit)        │  │   logs, diff stats)          │  │
//! │  └────────────┬────────────┘  └──────────────┬───────────────┘  │
//! │               └──────────────┬───────────────┘                  │
//! │                              ▼                                  │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │               History (git2 bare mirror)                  │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                              │                                  │
//! │                              ▼                                  │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                  EventSink (JSON lines)                   │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod events;
pub mod git;
pub mod reconcile;
pub mod report;
pub mod schedule;
pub mod snapshot;
pub mod tracker;
pub mod validation;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};

pub use backend::{DiffStats, History};
pub use config::{Overrides, TrackerConfig};
pub use events::{EventSink, JsonLinesSink};
pub use reconcile::{reconcile, Reconciliation};
pub use report::Report;
pub use snapshot::{BranchSnapshot, CommitRef, RepositorySnapshot, TagSnapshot};
pub use tracker::{RunState, Tracker};
