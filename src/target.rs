use url::Url;

/// One probe to perform: a base URL paired with a wordlist entry.
/// Created once at batch start, consumed exactly once, never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub base_url: String,
    pub word: String,
}

impl WorkItem {
    pub fn target_url(&self) -> String {
        build_target_url(&self.base_url, &self.word)
    }
}

/// Render the IIS cookieless-session probe path for a word.
///
/// The literal scaffold matters: IIS treats the `(S(x))` segments as a
/// cookieless session id and maps the remainder onto the application's `bin`
/// directory, so the path must match bit for bit for the check to mean
/// anything.
pub fn build_target_url(base_url: &str, word: &str) -> String {
    format!("{base_url}//(S(x))/b/(S(x))in/{word}.dll")
}

/// Full work set: cross product of base URLs and wordlist entries.
pub fn enumerate_targets(base_urls: &[String], wordlist: &[String]) -> Vec<WorkItem> {
    let mut items = Vec::with_capacity(base_urls.len() * wordlist.len());
    for base_url in base_urls {
        for word in wordlist {
            items.push(WorkItem {
                base_url: base_url.clone(),
                word: word.clone(),
            });
        }
    }
    items
}

/// Host key for per-host throttling. Unparsable base URLs all share the raw
/// string as their key, so they still land in a per-host bucket.
pub fn extract_host(base_url: &str) -> String {
    Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_string()))
        .unwrap_or_else(|| base_url.to_string())
}
