use reqwest::Client;
use std::time::Duration;

/// Content types that mark a served DLL handler.
const DLL_CONTENT_TYPES: [&str; 2] = ["application/x-msdownload", "application/octet-stream"];

/// Classified result of one probe. Produced exactly once per work item and
/// never mutated; transport failures are absorbed into `Failed` so a single
/// bad request can never abort the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 200 with a DLL-ish content type: the handler is likely present.
    Hit { url: String, content_type: String },
    /// 200 with some other content type, or a plain 404.
    Miss,
    /// Any other status, redirects included. No policy attached yet.
    Ignored { status: u16 },
    /// Timeout, connection refused, DNS or TLS failure.
    Failed { reason: String },
}

/// Classification rule, factored out of the transport so it can be tested
/// without a network. Priority: 200 + matching content type, then 200/404 as
/// misses, everything else ignored.
pub fn classify(url: &str, status: u16, content_type: Option<&str>) -> ProbeOutcome {
    match status {
        200 => {
            let ct = content_type.unwrap_or("").to_ascii_lowercase();
            if DLL_CONTENT_TYPES.iter().any(|t| ct.contains(t)) {
                ProbeOutcome::Hit {
                    url: url.to_string(),
                    content_type: ct,
                }
            } else {
                ProbeOutcome::Miss
            }
        }
        404 => ProbeOutcome::Miss,
        other => ProbeOutcome::Ignored { status: other },
    }
}

/// Issue a single GET against `url` under an absolute timeout and classify
/// the response. Headers only; the body is never read.
pub async fn probe_url(client: &Client, url: &str, timeout: Duration) -> ProbeOutcome {
    let resp = tokio::time::timeout(timeout, client.get(url).send()).await;
    match resp {
        Err(_) => ProbeOutcome::Failed {
            reason: format!("timeout after {}s", timeout.as_secs_f64()),
        },
        Ok(Err(e)) => ProbeOutcome::Failed {
            reason: e.to_string(),
        },
        Ok(Ok(r)) => {
            let status = r.status().as_u16();
            let content_type = r
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok());
            classify(url, status, content_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://example.com//(S(x))/b/(S(x))in/shell.dll";

    #[test]
    fn status_200_with_dll_content_type_is_hit() {
        let out = classify(URL, 200, Some("application/octet-stream"));
        assert_eq!(
            out,
            ProbeOutcome::Hit {
                url: URL.to_string(),
                content_type: "application/octet-stream".to_string()
            }
        );
        assert!(matches!(
            classify(URL, 200, Some("Application/X-MsDownload; charset=binary")),
            ProbeOutcome::Hit { .. }
        ));
    }

    #[test]
    fn status_200_with_other_content_type_is_miss() {
        assert_eq!(classify(URL, 200, Some("text/html")), ProbeOutcome::Miss);
        assert_eq!(classify(URL, 200, None), ProbeOutcome::Miss);
    }

    #[test]
    fn status_404_is_miss() {
        assert_eq!(classify(URL, 404, Some("text/html")), ProbeOutcome::Miss);
    }

    #[test]
    fn other_statuses_are_ignored() {
        assert_eq!(classify(URL, 302, None), ProbeOutcome::Ignored { status: 302 });
        assert_eq!(classify(URL, 500, None), ProbeOutcome::Ignored { status: 500 });
        assert_eq!(classify(URL, 403, Some("application/octet-stream")), ProbeOutcome::Ignored { status: 403 });
    }
}
