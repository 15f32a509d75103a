//! Numeric metric values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a numeric metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// 64-bit floating point
    Double,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumericKind::Int => "int",
            NumericKind::Long => "long",
            NumericKind::Double => "double",
        };
        f.write_str(name)
    }
}

/// A single metric value captured in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    /// 32-bit integer value
    Int(i32),
    /// 64-bit integer value
    Long(i64),
    /// Floating point value
    Double(f64),
}

impl Numeric {
    /// Kind of this value
    pub fn kind(&self) -> NumericKind {
        match self {
            Numeric::Int(_) => NumericKind::Int,
            Numeric::Long(_) => NumericKind::Long,
            Numeric::Double(_) => NumericKind::Double,
        }
    }

    /// Value widened to `f64`
    pub fn as_f64(&self) -> f64 {
        match *self {
            Numeric::Int(v) => v as f64,
            Numeric::Long(v) => v as f64,
            Numeric::Double(v) => v,
        }
    }

    /// Integer value, if this is not a floating point value
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Numeric::Int(v) => Some(v as i64),
            Numeric::Long(v) => Some(v),
            Numeric::Double(_) => None,
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(v) => write!(f, "{}", v),
            Numeric::Long(v) => write!(f, "{}", v),
            Numeric::Double(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for Numeric {
    fn from(value: i32) -> Self {
        Numeric::Int(value)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Long(value)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Double(value)
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
}

/// Rust types a declared metric may return
pub trait MetricValue: sealed::Sealed + Into<Numeric> + Copy {
    /// Kind recorded in the metric descriptor
    const KIND: NumericKind;
}

impl MetricValue for i32 {
    const KIND: NumericKind = NumericKind::Int;
}

impl MetricValue for i64 {
    const KIND: NumericKind = NumericKind::Long;
}

impl MetricValue for f64 {
    const KIND: NumericKind = NumericKind::Double;
}
