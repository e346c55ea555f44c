use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A permit that holds both global and per-host semaphore permits.
pub struct ThrottlePermit {
    _global: OwnedSemaphorePermit,
    _host: OwnedSemaphorePermit,
}

/// Bounds in-flight probes: a global cap across the whole batch plus an
/// independent cap per destination host. A probe task holds its permit for
/// its entire lifetime, including the post-probe delay, so the delay paces
/// that slot without serializing unrelated tasks.
pub struct Throttle {
    global: Arc<Semaphore>,
    per_host: DashMap<String, Arc<Semaphore>>,
    per_host_limit: usize,
}

impl Throttle {
    pub fn new(global_limit: usize, per_host_limit: usize) -> Self {
        Self {
            global: Arc::new(Semaphore::new(global_limit)),
            per_host: DashMap::new(),
            per_host_limit,
        }
    }

    fn host_semaphore(&self, host: &str) -> Arc<Semaphore> {
        self.per_host
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(Semaphore::new(self.per_host_limit)))
            .clone()
    }

    pub async fn acquire(&self, host: &str) -> ThrottlePermit {
        let host_sem = self.host_semaphore(host);
        // Acquire global then host
        let gperm = self
            .global
            .clone()
            .acquire_owned()
            .await
            .expect("global semaphore closed");
        let hperm = host_sem
            .acquire_owned()
            .await
            .expect("host semaphore closed");
        ThrottlePermit {
            _global: gperm,
            _host: hperm,
        }
    }
}
