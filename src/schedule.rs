//! Periodic and reactive triggering
//!
//! The scheduler runs one check immediately, then one per interval, plus
//! one for every [`Trigger`] received from upstream. Checks are awaited one
//! at a time, so a mirror path never sees two overlapping runs.

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::config::{Overrides, TrackerConfig};
use crate::events::EventSink;
use crate::report::Report;
use crate::tracker::Tracker;
use crate::{Error, Result};

/// A request for an out-of-schedule check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trigger {
    pub overrides: Overrides,
}

impl Trigger {
    pub fn new(overrides: Overrides) -> Self {
        Self { overrides }
    }
}

/// Drives checks of one configured repository
pub struct Scheduler<S: EventSink> {
    config: TrackerConfig,
    sink: S,
}

impl<S: EventSink> Scheduler<S> {
    pub fn new(config: TrackerConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run checks until `triggers` closes (when `periodic` is false) or
    /// the shutdown future resolves
    pub async fn run<F>(
        &mut self,
        mut triggers: mpsc::Receiver<Trigger>,
        periodic: bool,
        shutdown: F,
    ) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        if let Err(err) = self.config.validate() {
            self.report_failure(&err);
            return Err(err);
        }

        let mut ticker = interval_at(Instant::now() + self.config.interval, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(
            url = %self.config.repository,
            interval = ?self.config.interval,
            periodic,
            "Scheduler started"
        );
        self.check(self.config.clone()).await;

        let mut triggers_open = true;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Scheduler stopping");
                    break;
                }
                _ = ticker.tick(), if periodic => {
                    self.check(self.config.clone()).await;
                }
                trigger = triggers.recv(), if triggers_open => match trigger {
                    Some(trigger) => {
                        let config = self.config.with_overrides(&trigger.overrides);
                        self.check(config).await;
                    }
                    None => {
                        triggers_open = false;
                        if !periodic {
                            break;
                        }
                    }
                },
            }
        }

        Ok(())
    }

    /// One check, delivered to the sink either as a report or a failure
    async fn check(&mut self, config: TrackerConfig) {
        match run_blocking(config).await {
            Ok(report) => {
                if let Err(err) = self.sink.emit(&report) {
                    error!(error = %err, "Failed to emit report");
                }
            }
            Err(err) => self.report_failure(&err),
        }
    }

    fn report_failure(&mut self, err: &Error) {
        error!(error = %err, suggestion = err.suggestion().unwrap_or(""), "Check failed");
        if let Err(sink_err) = self.sink.report_failure(&err.to_string()) {
            error!(error = %sink_err, "Failed to report failure");
        }
    }
}

/// Run one check on the blocking pool
pub async fn run_blocking(config: TrackerConfig) -> Result<Report> {
    tokio::task::spawn_blocking(move || {
        let mut tracker = Tracker::new(config)?;
        tracker.run()
    })
    .await
    .map_err(|err| Error::Other(format!("check task failed: {err}")))?
}
