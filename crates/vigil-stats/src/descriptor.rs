//! Declared metric accessors
//!
//! A statistics type lists its metrics once, as a static slice of
//! [`MetricDescriptor`]s, usually through [`declare_metrics!`](crate::declare_metrics).
//! The snapshot builder walks that list instead of discovering accessors at
//! runtime.

use crate::builder;
use crate::{MetricError, MetricValue, Numeric, NumericKind};
use std::collections::HashMap;

/// Accessor reading a metric independent of any interval
pub type ScalarFn<S> = fn(&S) -> Result<Numeric, MetricError>;

/// Accessor reading a metric for one interval
pub type IntervalFn<S> = fn(&S, Option<&str>) -> Result<Numeric, MetricError>;

/// Shape of a metric accessor
pub enum Accessor<S> {
    /// Takes no argument
    Scalar(ScalarFn<S>),
    /// Takes the requested interval name
    PerInterval(IntervalFn<S>),
}

/// A named, read-only numeric property of a statistics type
pub struct MetricDescriptor<S> {
    name: &'static str,
    kind: NumericKind,
    accessor: Accessor<S>,
}

impl<S> MetricDescriptor<S> {
    /// Describe a metric independent of any interval
    pub const fn scalar(name: &'static str, kind: NumericKind, accessor: ScalarFn<S>) -> Self {
        Self {
            name,
            kind,
            accessor: Accessor::Scalar(accessor),
        }
    }

    /// Describe a metric computed per interval
    pub const fn per_interval(
        name: &'static str,
        kind: NumericKind,
        accessor: IntervalFn<S>,
    ) -> Self {
        Self {
            name,
            kind,
            accessor: Accessor::PerInterval(accessor),
        }
    }

    /// Logical property name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared kind
    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    /// Whether the accessor takes an interval
    pub fn is_per_interval(&self) -> bool {
        matches!(self.accessor, Accessor::PerInterval(_))
    }

    /// Read the current value
    ///
    /// Scalar accessors ignore `interval`. A value of another kind than the
    /// declared one is rejected.
    pub fn read(&self, stats: &S, interval: Option<&str>) -> Result<Numeric, MetricError> {
        let value = match &self.accessor {
            Accessor::Scalar(read) => read(stats)?,
            Accessor::PerInterval(read) => read(stats, interval)?,
        };
        if value.kind() != self.kind {
            return Err(MetricError::KindMismatch {
                metric: self.name.to_string(),
                expected: self.kind,
                actual: value.kind(),
            });
        }
        Ok(value)
    }
}

/// A statistics type with a static list of metric accessors
pub trait DeclareMetrics: Sized + 'static {
    /// Every metric of this type
    const METRICS: &'static [MetricDescriptor<Self>];

    /// Tag recorded in snapshots, the simple type name by default
    fn type_tag() -> &'static str {
        simple_type_name::<Self>()
    }
}

/// Object-safe view over the declared metrics of a statistics object
pub trait MetricSource {
    /// Type tag recorded in snapshots
    fn interface_tag(&self) -> &'static str;

    /// Names of all declared metrics
    fn metric_names(&self) -> Vec<&'static str>;

    /// Read every declared metric for `interval`
    fn read_metrics(&self, interval: Option<&str>) -> Result<HashMap<String, Numeric>, MetricError>;
}

impl<T: DeclareMetrics> MetricSource for T {
    fn interface_tag(&self) -> &'static str {
        T::type_tag()
    }

    fn metric_names(&self) -> Vec<&'static str> {
        T::METRICS.iter().map(MetricDescriptor::name).collect()
    }

    fn read_metrics(&self, interval: Option<&str>) -> Result<HashMap<String, Numeric>, MetricError> {
        builder::read_all(T::METRICS, self, interval)
    }
}

/// Type name without module path or generic arguments
pub fn simple_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Convert an accessor's return value into a metric value
pub trait MetricOutput<T: MetricValue> {
    /// Value or accessor failure
    fn into_metric(self) -> Result<T, MetricError>;
}

macro_rules! impl_metric_output {
    ($($ty:ty),*) => {
        $(
            impl MetricOutput<$ty> for $ty {
                fn into_metric(self) -> Result<$ty, MetricError> {
                    Ok(self)
                }
            }

            impl MetricOutput<$ty> for Result<$ty, MetricError> {
                fn into_metric(self) -> Result<$ty, MetricError> {
                    self
                }
            }
        )*
    };
}

impl_metric_output!(i32, i64, f64);

#[doc(hidden)]
pub fn read_value<T: MetricValue, O: MetricOutput<T>>(output: O) -> Result<Numeric, MetricError> {
    output.into_metric().map(Into::into)
}

/// Whether all names differ, usable in constant context
pub const fn names_are_unique(names: &[&str]) -> bool {
    let mut i = 0;
    while i < names.len() {
        let mut j = i + 1;
        while j < names.len() {
            if str_eq(names[i], names[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
