//! Per-interval value stores

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use vigil_stats::MetricError;

/// One atomic slot per configured interval, plus the absolute slot
struct IntervalSlots {
    absolute: AtomicI64,
    intervals: RwLock<HashMap<String, Arc<AtomicI64>>>,
    initial: i64,
}

impl IntervalSlots {
    fn new<I, N>(intervals: I, initial: i64) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let intervals = intervals
            .into_iter()
            .map(|name| (name.into(), Arc::new(AtomicI64::new(initial))))
            .collect();
        Self {
            absolute: AtomicI64::new(initial),
            intervals: RwLock::new(intervals),
            initial,
        }
    }

    fn update(&self, apply: impl Fn(&AtomicI64)) {
        apply(&self.absolute);
        for slot in self.intervals.read().values() {
            apply(slot);
        }
    }

    fn value(&self, interval: Option<&str>) -> Result<i64, MetricError> {
        let Some(name) = interval else {
            return Ok(self.absolute.load(Ordering::Relaxed));
        };
        self.intervals
            .read()
            .get(name)
            .map(|slot| slot.load(Ordering::Relaxed))
            .ok_or_else(|| MetricError::UnknownInterval {
                interval: name.to_string(),
            })
    }

    fn add_interval(&self, name: &str) {
        let intervals = self.intervals.read();
        if intervals.contains_key(name) {
            return;
        }
        drop(intervals);

        self.intervals
            .write()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(AtomicI64::new(self.initial)));
    }

    fn reset(&self, name: &str) -> Result<(), MetricError> {
        match self.intervals.read().get(name) {
            Some(slot) => {
                slot.store(self.initial, Ordering::Relaxed);
                Ok(())
            }
            None => Err(MetricError::UnknownInterval {
                interval: name.to_string(),
            }),
        }
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.intervals.read().keys().cloned().collect();
        names.sort();
        names
    }
}

/// Monotonic counter tracked per interval
///
/// Reading without an interval returns the total since creation.
pub struct IntervalCounter {
    slots: IntervalSlots,
}

impl IntervalCounter {
    /// Create a counter tracking the given intervals
    pub fn new<I, N>(intervals: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            slots: IntervalSlots::new(intervals, 0),
        }
    }

    /// Add one
    pub fn increment(&self) {
        self.add(1);
    }

    /// Add `delta` to the total and every interval
    pub fn add(&self, delta: i64) {
        self.slots.update(|slot| {
            slot.fetch_add(delta, Ordering::Relaxed);
        });
    }

    /// Value for `interval`, or the total for `None`
    pub fn value(&self, interval: Option<&str>) -> Result<i64, MetricError> {
        self.slots.value(interval)
    }

    /// Start tracking another interval
    pub fn add_interval(&self, name: &str) {
        self.slots.add_interval(name);
    }

    /// Start a new period of `name`
    pub fn reset_interval(&self, name: &str) -> Result<(), MetricError> {
        self.slots.reset(name)
    }

    /// Tracked interval names, sorted
    pub fn interval_names(&self) -> Vec<String> {
        self.slots.names()
    }
}

/// Largest observed value tracked per interval
///
/// Reads as `i64::MIN` until something is observed.
pub struct IntervalMax {
    slots: IntervalSlots,
}

impl IntervalMax {
    /// Create a maximum tracking the given intervals
    pub fn new<I, N>(intervals: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            slots: IntervalSlots::new(intervals, i64::MIN),
        }
    }

    /// Record an observation
    pub fn observe(&self, value: i64) {
        self.slots.update(|slot| {
            slot.fetch_max(value, Ordering::Relaxed);
        });
    }

    /// Maximum for `interval`, or the overall maximum for `None`
    pub fn value(&self, interval: Option<&str>) -> Result<i64, MetricError> {
        self.slots.value(interval)
    }

    /// Start tracking another interval
    pub fn add_interval(&self, name: &str) {
        self.slots.add_interval(name);
    }

    /// Start a new period of `name`
    pub fn reset_interval(&self, name: &str) -> Result<(), MetricError> {
        self.slots.reset(name)
    }
}

/// Current value, independent of intervals
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    /// Create a gauge at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one
    pub fn increment(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Subtract one
    pub fn decrement(&self) {
        self.value.fetch_sub(1, Ordering::Relaxed);
    }

    /// Set the value
    pub fn set(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// Current value
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}
