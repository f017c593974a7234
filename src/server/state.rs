// Host state module
// Shared, read-only registry plus per-process counters

use chrono::Utc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::handler::Handlers;

pub struct HostState {
    pub config: Config,
    /// Never mutated after startup
    pub handlers: Arc<Handlers>,
    pub active_connections: AtomicUsize,
    invocations: AtomicU64,
}

impl HostState {
    pub fn new(config: Config, handlers: Handlers) -> Self {
        Self {
            config,
            handlers: Arc::new(handlers),
            active_connections: AtomicUsize::new(0),
            invocations: AtomicU64::new(0),
        }
    }

    /// Locally unique request id: start time in millis plus a sequence number
    pub fn next_request_id(&self) -> String {
        let seq = self.invocations.fetch_add(1, Ordering::Relaxed);
        format!("{:x}-{seq:08x}", Utc::now().timestamp_millis())
    }

    pub fn invocation_count(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let cfg = Config::load_from("does-not-exist/proxy-router").unwrap();
        let state = HostState::new(cfg, Handlers::new());

        let first = state.next_request_id();
        let second = state.next_request_id();
        assert_ne!(first, second);
        assert!(first.ends_with("-00000000"));
        assert!(second.ends_with("-00000001"));
        assert_eq!(state.invocation_count(), 2);
    }
}
