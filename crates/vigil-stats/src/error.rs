//! Statistics error types

use crate::NumericKind;
use thiserror::Error;

/// Failure to read a single metric
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    /// The accessor itself failed
    #[error("metric {metric} could not be read: {reason}")]
    Accessor {
        /// Metric name
        metric: String,
        /// Failure reason
        reason: String,
    },

    /// The accessor returned a value of another kind than declared
    #[error("metric {metric} declared as {expected} but returned {actual}")]
    KindMismatch {
        /// Metric name
        metric: String,
        /// Declared kind
        expected: NumericKind,
        /// Kind actually returned
        actual: NumericKind,
    },

    /// The same metric name is declared twice
    #[error("metric {metric} is declared more than once")]
    Duplicate {
        /// Metric name
        metric: String,
    },

    /// The requested interval is not tracked by the statistics object
    #[error("unknown interval: {interval}")]
    UnknownInterval {
        /// Requested interval name
        interval: String,
    },
}

/// Statistics operation errors
#[derive(Debug, Error)]
pub enum StatsError {
    /// The statistics type does not provide this capability
    #[error("{stats_type} does not support {capability}")]
    UnsupportedCapability {
        /// Capability that was requested
        capability: &'static str,
        /// Type tag of the statistics object
        stats_type: &'static str,
    },

    /// A snapshot could not be built
    #[error("statistics object does not expose only primitive-numeric accessors as required to build a snapshot.")]
    SnapshotConstruction(#[source] MetricError),
}

/// Result type for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;
