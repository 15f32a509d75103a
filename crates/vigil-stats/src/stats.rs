//! The statistics object contract

use crate::{build_snapshot, MetricSource, StatsError, StatsResult, StatsSnapshot, TimeUnit};

/// Name used when a statistics object is created without one
pub const UNNAMED: &str = "unnamed";

/// Returned by [`Stats::value_by_name_as_string`] for values a type does not provide
pub const NONE_VALUE: &str = "none";

/// Tracks a single call or operation
pub trait CallExecution {
    /// Mark the beginning of the call
    fn start_execution(&mut self);

    /// Mark the successful end of the call, optionally with a result label
    fn finish_execution(&mut self, result: Option<&str>);

    /// Mark the call as failed
    fn abort_execution(&mut self);
}

/// A live, mutable object exposing named numeric metrics
///
/// Implementors provide a name, the canonical rendering and their metric
/// declarations (see [`declare_metrics!`](crate::declare_metrics)); every
/// other operation has a default.
pub trait Stats: MetricSource + Send + Sync {
    /// Display name, fixed at construction
    fn name(&self) -> &str;

    /// Human-readable rendering for `interval` with durations in `unit`
    fn to_stats_string_with(&self, interval: Option<&str>, unit: TimeUnit) -> String;

    /// Rendering of the default interval in milliseconds
    fn to_stats_string(&self) -> String {
        self.to_stats_string_in(TimeUnit::Milliseconds)
    }

    /// Rendering of `interval` in milliseconds
    fn to_stats_string_for(&self, interval: &str) -> String {
        self.to_stats_string_with(Some(interval), TimeUnit::Milliseconds)
    }

    /// Rendering of the default interval in `unit`
    fn to_stats_string_in(&self, unit: TimeUnit) -> String {
        self.to_stats_string_with(None, unit)
    }

    /// A single value rendered as string, [`NONE_VALUE`] when not provided
    fn value_by_name_as_string(
        &self,
        _value_name: &str,
        _interval: Option<&str>,
        _unit: TimeUnit,
    ) -> String {
        NONE_VALUE.to_string()
    }

    /// Names accepted by [`Stats::value_by_name_as_string`]
    fn available_value_names(&self) -> &[&str] {
        &[]
    }

    /// Begin tracking a single call
    fn create_call_execution(&self) -> StatsResult<Box<dyn CallExecution + '_>> {
        Err(StatsError::UnsupportedCapability {
            capability: "call execution",
            stats_type: self.interface_tag(),
        })
    }

    /// Capture every declared metric for `interval`
    ///
    /// `None` selects the object's default interval.
    fn create_snapshot(&self, interval: Option<&str>, producer_id: &str) -> StatsResult<StatsSnapshot> {
        build_snapshot(self, interval, producer_id)
    }
}

/// Shared state of statistics objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsBase {
    name: String,
}

impl StatsBase {
    /// Create with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Create named [`UNNAMED`]
    pub fn unnamed() -> Self {
        Self::new(UNNAMED)
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for StatsBase {
    fn default() -> Self {
        Self::unnamed()
    }
}
