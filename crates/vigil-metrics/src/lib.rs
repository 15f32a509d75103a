//! # vigil-metrics
//!
//! Building blocks for concrete Vigil statistics objects.
//!
//! Features:
//! - Counters and maxima tracked per reporting interval
//! - Gauges for current values
//! - `ServiceStats` with call-execution tracking
//! - JSON configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod service;
mod values;

pub use config::{ConfigError, StatsConfig};
pub use service::{ServiceCallExecution, ServiceStats, SERVICE_VALUE_NAMES};
pub use values::{Gauge, IntervalCounter, IntervalMax};

#[doc(hidden)]
pub use vigil_stats as __stats;

/// Record the duration of a block as one call on a [`ServiceStats`]
///
/// Leaving the block early, including by panic, records a failed call.
#[macro_export]
macro_rules! timed {
    ($stats:expr, $block:block) => {{
        let mut execution = $crate::ServiceCallExecution::new(&$stats);
        $crate::__stats::CallExecution::start_execution(&mut execution);
        let result = $block;
        $crate::__stats::CallExecution::finish_execution(&mut execution, None);
        result
    }};
}
