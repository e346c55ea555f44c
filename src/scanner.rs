use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::RunConfig;
use crate::findings::FindingLog;
use crate::http_client::create_probe_client;
use crate::probe::http_probe::{probe_url, ProbeOutcome};
use crate::probe::throttle::Throttle;
use crate::target::{enumerate_targets, extract_host};

/// Per-outcome counters for the final report.
#[derive(Default)]
pub struct ScanStats {
    pub hits: AtomicUsize,
    pub misses: AtomicUsize,
    pub ignored: AtomicUsize,
    pub failed: AtomicUsize,
}

impl ScanStats {
    fn count(&self, outcome: &ProbeOutcome) {
        let counter = match outcome {
            ProbeOutcome::Hit { .. } => &self.hits,
            ProbeOutcome::Miss => &self.misses,
            ProbeOutcome::Ignored { .. } => &self.ignored,
            ProbeOutcome::Failed { .. } => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> (usize, usize, usize, usize) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.ignored.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed),
        )
    }
}

/// Drive a full batch: enumerate the (base URL x word) cross product, fan it
/// out under the throttle, record hits, and return the summary in
/// first-observed order.
///
/// Each work item is attempted exactly once. The spawned task holds its
/// throttle permit across the probe and the inter-request delay, so each
/// concurrency slot paces its own cadence; the delay applies after failures
/// too, to avoid hammering a target that is already struggling. Cancelling
/// the token stops dispatch of new items while in-flight probes finish or
/// time out on their own.
pub async fn run_scan(
    config: &RunConfig,
    findings: Arc<FindingLog>,
    stats: Arc<ScanStats>,
    cancel: CancellationToken,
) -> anyhow::Result<Vec<String>> {
    let items = enumerate_targets(&config.base_urls, &config.wordlist);
    let client = create_probe_client(config.per_request_timeout, config.per_host_limit)?;
    let throttle = Arc::new(Throttle::new(
        config.concurrency_limit,
        config.per_host_limit,
    ));

    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} req",
        )?
        .progress_chars("#>-"),
    );

    let timeout = config.per_request_timeout;
    let delay = config.inter_request_delay;
    let mut futures = FuturesUnordered::new();

    for item in items {
        if cancel.is_cancelled() {
            break;
        }
        let host = extract_host(&item.base_url);
        let permit = throttle.acquire(&host).await;
        let client = client.clone();
        let findings = findings.clone();
        let stats = stats.clone();
        let pb = pb.clone();

        futures.push(tokio::spawn(async move {
            let url = item.target_url();
            let outcome = probe_url(&client, &url, timeout).await;
            stats.count(&outcome);
            match &outcome {
                ProbeOutcome::Hit { url, content_type } => {
                    match findings.record(&outcome) {
                        Ok(true) => {
                            tracing::info!(%url, %content_type, "DLL likely present");
                            pb.println(format!("[+] {url} (DLL likely present)"));
                        }
                        Ok(false) => {}
                        Err(e) => tracing::error!(error=%e, %url, "failed to persist finding"),
                    }
                }
                ProbeOutcome::Ignored { status } => {
                    tracing::debug!(%url, status, "unexpected status, ignored");
                }
                ProbeOutcome::Failed { reason } => {
                    tracing::debug!(%url, %reason, "probe failed");
                }
                ProbeOutcome::Miss => {}
            }
            // Throttle this slot's cadence regardless of outcome
            tokio::time::sleep(delay).await;
            drop(permit);
            pb.inc(1);
        }));
    }

    while let Some(res) = futures.next().await {
        if let Err(e) = res {
            tracing::error!(error=%e, "probe task panicked");
        }
    }
    pb.finish_and_clear();

    Ok(findings.summary())
}
