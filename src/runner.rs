use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::cli::Cli;
use dll_hunter::scanner::{run_scan, ScanStats};
use dll_hunter::utils;
use dll_hunter::{FindingLog, RunConfig};

fn print_ascii_logo() {
    println!(
        r#"
            ____  _     _       _   _ _   _ _   _ _____ _____ ____
           |  _ \| |   | |     | | | | | | | \ | |_   _| ____|  _ \
           | | | | |   | |     | |_| | | | |  \| | | | |  _| | |_) |
           | |_| | |___| |___  |  _  | |_| | |\  | | | | |___|  _ <
           |____/|_____|_____| |_| |_|\___/|_| \_| |_| |_____|_| \_\

                     IIS cookieless-session DLL probe v0.1.0
    "#
    );
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    // Configure logging based on global flags.
    // Keep external crates (reqwest/hyper) at INFO to avoid flooding the CLI.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter_str = format!("dll_hunter={crate_level},reqwest=info,hyper=info,h2=info");
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .init();

    // Input files are the one fatal error class: fail here, before any
    // network activity.
    let base_urls = utils::read_lines(&PathBuf::from(&cli.urls))?;
    let wordlist = utils::read_lines(&PathBuf::from(&cli.wordlist))?;

    let config = RunConfig {
        base_urls,
        wordlist,
        concurrency_limit: cli.concurrency,
        per_host_limit: cli.per_host,
        per_request_timeout: Duration::from_secs(cli.timeout),
        inter_request_delay: Duration::from_secs_f64(cli.throttle),
    };

    let out_dir = PathBuf::from(&cli.out);
    utils::ensure_dir(&out_dir)?;
    let log_path = out_dir.join("found_urls.log");
    let findings = Arc::new(FindingLog::open(&log_path)?);
    let stats = Arc::new(ScanStats::default());

    print_ascii_logo();
    println!(
        "[>] Targets: {} base URLs x {} words = {} requests",
        config.base_urls.len(),
        config.wordlist.len(),
        config.base_urls.len() * config.wordlist.len()
    );
    println!(
        "[~] Concurrency: {} (per-host: {}), timeout: {}s, throttle: {}s",
        config.concurrency_limit, config.per_host_limit, cli.timeout, cli.throttle
    );
    println!("[~] Hit log: {}", log_path.display());
    println!("\n{}\n", "-".repeat(60));

    tracing::info!(
        urls = config.base_urls.len(),
        words = config.wordlist.len(),
        concurrency = config.concurrency_limit,
        per_host = config.per_host_limit,
        timeout = cli.timeout,
        throttle = cli.throttle,
        "Starting scan"
    );

    // Ctrl-C stops dispatching new probes; in-flight ones finish or time out.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\n[!] Interrupt received, draining in-flight probes...");
                cancel.cancel();
            }
        });
    }

    let scan_start = std::time::Instant::now();
    let summary = run_scan(&config, findings, stats.clone(), cancel).await?;
    let elapsed = scan_start.elapsed();

    let (hits, misses, ignored, failed) = stats.snapshot();
    println!("\n{}\n", "-".repeat(60));
    if summary.is_empty() {
        // No findings is still a successful run
        println!("[·] No DLL handlers found");
    } else {
        println!("[+] Found URLs:");
        for url in &summary {
            println!("    {url}");
        }
    }
    println!(
        "\n[~] Done in {:.1}s: {} hits, {} misses, {} ignored, {} failed",
        elapsed.as_secs_f64(),
        hits,
        misses,
        ignored,
        failed
    );

    Ok(())
}
