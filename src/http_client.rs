use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Build the shared HTTP client used by every probe.
///
/// Targets are routinely fronted by self-signed or otherwise untrusted TLS,
/// so certificate validation is disabled (security-research tooling only).
/// Redirects are never followed: a redirect status must surface to the
/// classifier as-is.
pub fn create_probe_client(timeout: Duration, per_host_limit: usize) -> anyhow::Result<Client> {
    let client = ClientBuilder::new()
        // Connection pooling - reuse connections aggressively
        .pool_max_idle_per_host(per_host_limit)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true) // Disable Nagle's algorithm for lower latency

        // Timeouts
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))

        // Compression
        .gzip(true)
        .brotli(true)

        // TLS
        .use_rustls_tls()
        .tls_sni(true)
        .https_only(false) // Allow both HTTP and HTTPS

        // Redirect responses are classification input, never followed
        .redirect(reqwest::redirect::Policy::none())

        // User agent
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")

        .danger_accept_invalid_certs(true)

        .build()?;
    Ok(client)
}
