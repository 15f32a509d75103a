//! Statistics of a service handling calls

use crate::{Gauge, IntervalCounter, IntervalMax, StatsConfig};
use std::time::{Duration, Instant};
use vigil_stats::{
    declare_metrics, CallExecution, MetricError, Stats, StatsBase, StatsResult, TimeUnit, NONE_VALUE,
};

/// Names accepted by [`ServiceStats::value_by_name_as_string`]
pub const SERVICE_VALUE_NAMES: &[&str] = &["TR", "TT", "CR", "ERR", "MAX", "AVG"];

/// Request statistics of a single service
///
/// Durations are stored in nanoseconds and converted to the requested unit
/// when rendered. Snapshots carry the raw nanosecond values.
pub struct ServiceStats {
    base: StatsBase,
    default_unit: TimeUnit,
    total_requests: IntervalCounter,
    total_time: IntervalCounter,
    errors: IntervalCounter,
    max_time: IntervalMax,
    current_requests: Gauge,
}

impl ServiceStats {
    /// Create from a configuration
    pub fn new(config: &StatsConfig) -> Self {
        let intervals = || config.intervals.iter().cloned();
        Self {
            base: StatsBase::new(config.name.clone()),
            default_unit: config.default_unit,
            total_requests: IntervalCounter::new(intervals()),
            total_time: IntervalCounter::new(intervals()),
            errors: IntervalCounter::new(intervals()),
            max_time: IntervalMax::new(intervals()),
            current_requests: Gauge::new(),
        }
    }

    /// Create with the default intervals
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(&StatsConfig::named(name))
    }

    /// A call started
    pub fn notify_request_begin(&self) {
        self.total_requests.increment();
        self.current_requests.increment();
    }

    /// A call finished after `elapsed`
    pub fn notify_request_finished(&self, elapsed: Duration) {
        let nanos = i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX);
        self.total_time.add(nanos);
        self.max_time.observe(nanos);
        self.current_requests.decrement();
    }

    /// A call failed
    pub fn notify_request_failed(&self) {
        self.errors.increment();
        self.current_requests.decrement();
    }

    /// Start a new period of `interval` for every value
    pub fn reset_interval(&self, interval: &str) -> Result<(), MetricError> {
        self.total_requests.reset_interval(interval)?;
        self.total_time.reset_interval(interval)?;
        self.errors.reset_interval(interval)?;
        self.max_time.reset_interval(interval)?;
        tracing::trace!(stats = self.base.name(), interval, "interval reset");
        Ok(())
    }

    /// Start tracking `interval` for every value, from zero
    pub fn add_interval(&self, interval: &str) {
        self.total_requests.add_interval(interval);
        self.total_time.add_interval(interval);
        self.errors.add_interval(interval);
        self.max_time.add_interval(interval);
        tracing::trace!(stats = self.base.name(), interval, "interval added");
    }

    /// Tracked interval names, sorted
    pub fn interval_names(&self) -> Vec<String> {
        self.total_requests.interval_names()
    }

    /// Number of started calls
    pub fn total_requests(&self, interval: Option<&str>) -> Result<i64, MetricError> {
        self.total_requests.value(interval)
    }

    /// Time spent in finished calls, in nanoseconds
    pub fn total_time(&self, interval: Option<&str>) -> Result<i64, MetricError> {
        self.total_time.value(interval)
    }

    /// Number of failed calls
    pub fn errors(&self, interval: Option<&str>) -> Result<i64, MetricError> {
        self.errors.value(interval)
    }

    /// Longest finished call in nanoseconds, 0 before the first one
    pub fn max_time(&self, interval: Option<&str>) -> Result<i64, MetricError> {
        self.max_time
            .value(interval)
            .map(|max| if max == i64::MIN { 0 } else { max })
    }

    /// Average call time in nanoseconds, 0 without calls
    pub fn average_time(&self, interval: Option<&str>) -> Result<f64, MetricError> {
        let requests = self.total_requests(interval)?;
        if requests == 0 {
            return Ok(0.0);
        }
        Ok(self.total_time(interval)? as f64 / requests as f64)
    }

    /// Calls currently in progress
    pub fn current_requests(&self) -> i64 {
        self.current_requests.value()
    }

    fn render_value(
        &self,
        value_name: &str,
        interval: Option<&str>,
        unit: TimeUnit,
    ) -> Result<Option<String>, MetricError> {
        let rendered = match value_name {
            "TR" => self.total_requests(interval)?.to_string(),
            "TT" => unit.convert_nanos(self.total_time(interval)?).to_string(),
            "CR" => self.current_requests().to_string(),
            "ERR" => self.errors(interval)?.to_string(),
            "MAX" => unit.convert_nanos(self.max_time(interval)?).to_string(),
            "AVG" => format!("{:.3}", unit.convert_nanos_f64(self.average_time(interval)?)),
            _ => return Ok(None),
        };
        Ok(Some(rendered))
    }
}

declare_metrics!(ServiceStats {
    TotalRequests: i64 = total_requests(interval),
    TotalTime: i64 = total_time(interval),
    CurrentRequests: i64 = current_requests,
    Errors: i64 = errors(interval),
    MaxTime: i64 = max_time(interval),
    AverageTime: f64 = average_time(interval),
});

impl Stats for ServiceStats {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn to_stats_string_with(&self, interval: Option<&str>, unit: TimeUnit) -> String {
        let values: Vec<String> = SERVICE_VALUE_NAMES
            .iter()
            .map(|name| {
                format!(
                    "{}: {}",
                    name,
                    self.value_by_name_as_string(name, interval, unit)
                )
            })
            .collect();
        format!("{} {} [{}]", self.name(), values.join(", "), unit)
    }

    fn to_stats_string(&self) -> String {
        self.to_stats_string_in(self.default_unit)
    }

    fn to_stats_string_for(&self, interval: &str) -> String {
        self.to_stats_string_with(Some(interval), self.default_unit)
    }

    fn value_by_name_as_string(&self, value_name: &str, interval: Option<&str>, unit: TimeUnit) -> String {
        match self.render_value(value_name, interval, unit) {
            Ok(Some(rendered)) => rendered,
            Ok(None) | Err(_) => NONE_VALUE.to_string(),
        }
    }

    fn available_value_names(&self) -> &[&str] {
        SERVICE_VALUE_NAMES
    }

    fn create_call_execution(&self) -> StatsResult<Box<dyn CallExecution + '_>> {
        Ok(Box::new(ServiceCallExecution::new(self)))
    }
}

/// A single call recorded into [`ServiceStats`]
///
/// Dropping a started execution without finishing it counts as a failure.
pub struct ServiceCallExecution<'a> {
    stats: &'a ServiceStats,
    started: Option<Instant>,
}

impl<'a> ServiceCallExecution<'a> {
    /// Create an execution that has not started yet
    pub fn new(stats: &'a ServiceStats) -> Self {
        Self { stats, started: None }
    }

    /// Whether the call is in progress
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }
}

impl CallExecution for ServiceCallExecution<'_> {
    fn start_execution(&mut self) {
        if self.started.is_some() {
            tracing::debug!(stats = self.stats.name(), "execution already started");
            return;
        }
        self.stats.notify_request_begin();
        self.started = Some(Instant::now());
    }

    fn finish_execution(&mut self, result: Option<&str>) {
        if let Some(started) = self.started.take() {
            let elapsed = started.elapsed();
            tracing::trace!(
                stats = self.stats.name(),
                result = result.unwrap_or(""),
                elapsed_ns = elapsed.as_nanos() as u64,
                "execution finished"
            );
            self.stats.notify_request_finished(elapsed);
        }
    }

    fn abort_execution(&mut self) {
        if self.started.take().is_some() {
            self.stats.notify_request_failed();
        }
    }
}

impl Drop for ServiceCallExecution<'_> {
    fn drop(&mut self) {
        self.abort_execution();
    }
}
