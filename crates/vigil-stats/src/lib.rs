//! # vigil-stats
//!
//! Statistics contract and point-in-time snapshots for Vigil.
//!
//! Features:
//! - `Stats` contract with default behaviors
//! - Declared metric accessors via `declare_metrics!`
//! - Immutable `StatsSnapshot` values with JSON export
//!
//! Snapshots read each metric independently. While the statistics object
//! keeps being updated, two properties of one snapshot may come from
//! slightly different instants.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
pub mod descriptor;
mod error;
mod numeric;
mod snapshot;
mod stats;
mod unit;

pub use builder::build_snapshot;
pub use descriptor::{Accessor, DeclareMetrics, MetricDescriptor, MetricSource};
pub use error::{MetricError, StatsError, StatsResult};
pub use numeric::{MetricValue, Numeric, NumericKind};
pub use snapshot::StatsSnapshot;
pub use stats::{CallExecution, Stats, StatsBase, NONE_VALUE, UNNAMED};
pub use unit::TimeUnit;

/// Declare the metric accessors of a statistics type.
///
/// Each entry maps a logical property name to a method. A bare method is a
/// scalar metric; `method(interval)` is invoked with the requested interval.
/// The declared type must be `i32`, `i64` or `f64`, and the method may return
/// either that type or `Result<_, MetricError>` of it.
///
/// ```
/// use vigil_stats::{declare_metrics, Numeric, Stats, StatsBase, TimeUnit};
///
/// struct CacheStats {
///     base: StatsBase,
///     hits: i64,
///     misses: i64,
/// }
///
/// impl CacheStats {
///     fn hits(&self) -> i64 {
///         self.hits
///     }
///
///     fn hit_ratio(&self, _interval: Option<&str>) -> f64 {
///         self.hits as f64 / (self.hits + self.misses) as f64
///     }
/// }
///
/// declare_metrics!(CacheStats {
///     Hits: i64 = hits,
///     HitRatio: f64 = hit_ratio(interval),
/// });
///
/// impl Stats for CacheStats {
///     fn name(&self) -> &str {
///         self.base.name()
///     }
///
///     fn to_stats_string_with(&self, _interval: Option<&str>, _unit: TimeUnit) -> String {
///         format!("{} Hits: {}", self.name(), self.hits)
///     }
/// }
///
/// fn main() {
///     let stats = CacheStats { base: StatsBase::new("cache"), hits: 3, misses: 1 };
///     let snapshot = stats.create_snapshot(Some("1m"), "node-1").unwrap();
///
///     assert_eq!(snapshot.name(), "cache");
///     assert_eq!(snapshot.property("Hits"), Some(Numeric::Long(3)));
///     assert_eq!(snapshot.property("HitRatio"), Some(Numeric::Double(0.75)));
/// }
/// ```
///
/// Two entries with the same name are rejected at compile time:
///
/// ```compile_fail
/// use vigil_stats::declare_metrics;
///
/// struct Counters;
///
/// impl Counters {
///     fn hits(&self) -> i64 {
///         1
///     }
///
///     fn misses(&self) -> i64 {
///         0
///     }
/// }
///
/// declare_metrics!(Counters {
///     Hits: i64 = hits,
///     Hits: i64 = misses,
/// });
///
/// fn main() {}
/// ```
///
/// So is a declared type other than `i32`, `i64` or `f64`:
///
/// ```compile_fail
/// use vigil_stats::declare_metrics;
///
/// struct Counters;
///
/// impl Counters {
///     fn hits(&self) -> u64 {
///         1
///     }
/// }
///
/// declare_metrics!(Counters {
///     Hits: u64 = hits,
/// });
///
/// fn main() {}
/// ```
///
/// And a method whose return type differs from the declared one:
///
/// ```compile_fail
/// use vigil_stats::declare_metrics;
///
/// struct Counters;
///
/// impl Counters {
///     fn hits(&self) -> i32 {
///         1
///     }
/// }
///
/// declare_metrics!(Counters {
///     Hits: i64 = hits,
/// });
///
/// fn main() {}
/// ```
#[macro_export]
macro_rules! declare_metrics {
    ($ty:ty { $($name:ident : $kind:ty = $method:ident $(($arg:ident))?),* $(,)? }) => {
        impl $crate::DeclareMetrics for $ty {
            const METRICS: &'static [$crate::MetricDescriptor<Self>] = &[
                $($crate::__metric_descriptor!($kind, $name, $method $(, $arg)?)),*
            ];
        }

        const _: () = assert!(
            $crate::descriptor::names_are_unique(&[$(stringify!($name)),*]),
            concat!("duplicate metric name declared for ", stringify!($ty))
        );
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __metric_descriptor {
    ($kind:ty, $name:ident, $method:ident) => {
        $crate::MetricDescriptor::scalar(
            stringify!($name),
            <$kind as $crate::MetricValue>::KIND,
            |stats: &Self| $crate::descriptor::read_value::<$kind, _>(stats.$method()),
        )
    };
    ($kind:ty, $name:ident, $method:ident, $arg:ident) => {
        $crate::MetricDescriptor::per_interval(
            stringify!($name),
            <$kind as $crate::MetricValue>::KIND,
            |stats: &Self, $arg: Option<&str>| {
                $crate::descriptor::read_value::<$kind, _>(stats.$method($arg))
            },
        )
    };
}
