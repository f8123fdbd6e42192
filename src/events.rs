//! Event emission
//!
//! A finished run hands its [`Report`] to an [`EventSink`]; an aborted run
//! reports a single failure message instead. Never both.

use serde::Serialize;
use std::io::Write;

use crate::report::Report;

/// Destination for run outcomes
pub trait EventSink {
    /// Record an assembled report
    fn emit(&mut self, report: &Report) -> anyhow::Result<()>;

    /// Record a run that ended without a report
    fn report_failure(&mut self, message: &str) -> anyhow::Result<()>;
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum Event<'a> {
    Report { payload: &'a Report },
    Failure { message: &'a str },
}

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, event: &Event<'_>) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, report: &Report) -> anyhow::Result<()> {
        self.write(&Event::Report { payload: report })
    }

    fn report_failure(&mut self, message: &str) -> anyhow::Result<()> {
        self.write(&Event::Failure { message })
    }
}

/// Keeps every outcome in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub reports: Vec<Report>,
    pub failures: Vec<String>,
}

impl EventSink for MemorySink {
    fn emit(&mut self, report: &Report) -> anyhow::Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }

    fn report_failure(&mut self, message: &str) -> anyhow::Result<()> {
        self.failures.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RepositorySnapshot;
    use crate::testing::FakeHistory;

    #[test]
    fn test_json_lines() {
        let history = FakeHistory::new();
        let snapshot = RepositorySnapshot::default();
        let report = Report::assemble(&history, &snapshot, &snapshot).unwrap();

        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&report).unwrap();
        sink.report_failure("remote unreachable").unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "report");
        assert_eq!(lines[0]["payload"]["changed"], false);
        assert_eq!(lines[1]["event"], "failure");
        assert_eq!(lines[1]["message"], "remote unreachable");
    }
}
