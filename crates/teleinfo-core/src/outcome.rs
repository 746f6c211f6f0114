//! Decode outcome reporting.
//!
//! Decoders report exactly one of `frame_decoded` / `decode_error` per call,
//! plus the numeric projections of a successfully decoded historic frame.
//! Frame sources report `frame_read` / `frame_read_error`. Reporters are
//! injected by the caller and shared across threads, so every hook takes
//! `&self`.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::protocol::ErrorKind;

/// Label attached to an observation (e.g. `phase="1"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

/// Numeric projection of one decoded field.
///
/// # Examples
/// ```
/// use teleinfo_core::{Label, Observation};
///
/// let observation = Observation {
///     metric: "teleinfo_instensite_instantanee".to_string(),
///     labels: vec![Label {
///         name: "phase".to_string(),
///         value: "1".to_string(),
///     }],
///     value: 3.0,
/// };
/// assert_eq!(
///     observation.series(),
///     "teleinfo_instensite_instantanee{phase=\"1\"}"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub metric: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    pub value: f64,
}

impl Observation {
    /// Series identifier: metric name followed by its labels, if any.
    pub fn series(&self) -> String {
        let mut series = self.metric.clone();
        if self.labels.is_empty() {
            return series;
        }
        series.push('{');
        for (idx, label) in self.labels.iter().enumerate() {
            if idx > 0 {
                series.push(',');
            }
            let _ = write!(series, "{}=\"{}\"", label.name, label.value);
        }
        series.push('}');
        series
    }
}

pub trait OutcomeReporter: Send + Sync {
    /// A raw frame was acquired.
    fn frame_read(&self);
    /// Acquiring a raw frame failed.
    fn frame_read_error(&self, error_type: &str);
    /// A frame decoded successfully.
    fn frame_decoded(&self);
    /// A frame failed to decode.
    fn decode_error(&self, kind: ErrorKind);
    /// A decoded field was projected to a numeric value.
    fn observe(&self, observation: &Observation);
}

/// Reporter that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl OutcomeReporter for NoopReporter {
    fn frame_read(&self) {}
    fn frame_read_error(&self, _error_type: &str) {}
    fn frame_decoded(&self) {}
    fn decode_error(&self, _kind: ErrorKind) {}
    fn observe(&self, _observation: &Observation) {}
}

/// Snapshot of the outcome counters, keyed by `error_type` label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounters {
    pub frames_read: u64,
    pub frames_read_errors: BTreeMap<String, u64>,
    pub frames_decoded: u64,
    pub frames_decode_errors: BTreeMap<String, u64>,
}

/// Thread-safe reporter keeping counters and the last value of each series.
#[derive(Debug, Default)]
pub struct CountingReporter {
    frames_read: AtomicU64,
    frames_decoded: AtomicU64,
    read_errors: Mutex<BTreeMap<String, u64>>,
    decode_errors: Mutex<BTreeMap<String, u64>>,
    gauges: Mutex<BTreeMap<String, Observation>>,
}

impl CountingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> OutcomeCounters {
        OutcomeCounters {
            frames_read: self.frames_read.load(Ordering::Relaxed),
            frames_read_errors: lock(&self.read_errors).clone(),
            frames_decoded: self.frames_decoded.load(Ordering::Relaxed),
            frames_decode_errors: lock(&self.decode_errors).clone(),
        }
    }

    /// Last observation of each series, ordered by series identifier.
    pub fn observations(&self) -> Vec<Observation> {
        lock(&self.gauges).values().cloned().collect()
    }
}

impl OutcomeReporter for CountingReporter {
    fn frame_read(&self) {
        self.frames_read.fetch_add(1, Ordering::Relaxed);
    }

    fn frame_read_error(&self, error_type: &str) {
        *lock(&self.read_errors)
            .entry(error_type.to_string())
            .or_default() += 1;
    }

    fn frame_decoded(&self) {
        self.frames_decoded.fetch_add(1, Ordering::Relaxed);
    }

    fn decode_error(&self, kind: ErrorKind) {
        *lock(&self.decode_errors)
            .entry(kind.as_str().to_string())
            .or_default() += 1;
    }

    fn observe(&self, observation: &Observation) {
        lock(&self.gauges).insert(observation.series(), observation.clone());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
