use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::probe::http_probe::ProbeOutcome;

struct FindingInner {
    seen: HashSet<String>,
    summary: Vec<String>,
    log: File,
}

/// Deduplicates hits and persists each unique URL to an append-only log,
/// exactly once per run. The only shared mutable state in the system; the
/// membership check, set insert and file append happen under one lock so the
/// set and the log can never disagree.
///
/// Dedup is scoped to the current run: prior log contents are kept but never
/// read back, so re-running a batch appends its hits again.
pub struct FindingLog {
    inner: Mutex<FindingInner>,
}

impl FindingLog {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let log = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            inner: Mutex::new(FindingInner {
                seen: HashSet::new(),
                summary: Vec::new(),
                log,
            }),
        })
    }

    /// Record one outcome. Non-hits are no-ops. Returns true when the hit was
    /// new and has been appended to the durable log.
    pub fn record(&self, outcome: &ProbeOutcome) -> anyhow::Result<bool> {
        let ProbeOutcome::Hit { url, .. } = outcome else {
            return Ok(false);
        };
        let mut inner = self.inner.lock();
        if !inner.seen.insert(url.clone()) {
            return Ok(false);
        }
        writeln!(inner.log, "{url}")?;
        inner.summary.push(url.clone());
        Ok(true)
    }

    /// Hit URLs in first-observed order.
    pub fn summary(&self) -> Vec<String> {
        self.inner.lock().summary.clone()
    }
}
