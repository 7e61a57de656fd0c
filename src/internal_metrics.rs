//! A metrics recorder that writes the relay's counters to the log.
//!
//! Lambda freezes the process between invocations, so instead of a periodic
//! background task the counters are logged once at the end of each batch.

use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
use metrics_util::registry::{AtomicStorage, Registry};
use std::collections::BTreeMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

/// Counts in memory and logs a snapshot on demand. Clones share the same registry.
#[derive(Clone)]
pub struct LoggingRecorder {
    registry: Arc<Registry<Key, AtomicStorage>>,
}

impl LoggingRecorder {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry::new(AtomicStorage)),
        }
    }

    /// Current value of every counter, keyed as `name{label=value,...}`.
    pub fn counters(&self) -> BTreeMap<String, u64> {
        self.registry
            .get_counter_handles()
            .into_iter()
            .map(|(key, counter)| (render_key(&key), counter.load(Ordering::Relaxed)))
            .collect()
    }

    /// Logs every counter at INFO level.
    pub fn log_counters(&self) {
        for (key, value) in self.counters() {
            info!("[Counter] {}: {}", key, value);
        }
    }
}

impl Default for LoggingRecorder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn render_key(key: &Key) -> String {
    let labels: Vec<String> = key
        .labels()
        .map(|label| format!("{}={}", label.key(), label.value()))
        .collect();
    if labels.is_empty() {
        key.name().to_string()
    } else {
        format!("{}{{{}}}", key.name(), labels.join(","))
    }
}

impl Recorder for LoggingRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        self.registry
            .get_or_create_counter(key, |c| Counter::from_arc(c.clone()))
    }

    fn register_gauge(&self, key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        self.registry
            .get_or_create_gauge(key, |g| Gauge::from_arc(g.clone()))
    }

    fn register_histogram(&self, key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        self.registry
            .get_or_create_histogram(key, |h| Histogram::from_arc(h.clone()))
    }
}
