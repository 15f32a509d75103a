//! Time units used when rendering statistics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity a duration value is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Nanoseconds
    Nanoseconds,
    /// Microseconds
    Microseconds,
    /// Milliseconds
    #[default]
    Milliseconds,
    /// Seconds
    Seconds,
}

impl TimeUnit {
    fn nanos_per_unit(self) -> i64 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Seconds => 1_000_000_000,
        }
    }

    /// Convert a nanosecond quantity into this unit, truncating
    pub fn convert_nanos(self, nanos: i64) -> i64 {
        nanos / self.nanos_per_unit()
    }

    /// Convert a nanosecond quantity into this unit
    pub fn convert_nanos_f64(self, nanos: f64) -> f64 {
        nanos / self.nanos_per_unit() as f64
    }

    /// Short suffix, e.g. `ms`
    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_milliseconds() {
        assert_eq!(TimeUnit::default(), TimeUnit::Milliseconds);
    }

    #[test]
    fn test_convert_nanos() {
        assert_eq!(TimeUnit::Milliseconds.convert_nanos(2_500_000), 2);
        assert_eq!(TimeUnit::Microseconds.convert_nanos(2_500), 2);
        assert_eq!(TimeUnit::Nanoseconds.convert_nanos(17), 17);
        assert_eq!(TimeUnit::Seconds.convert_nanos_f64(1.5e9), 1.5);
    }

    #[test]
    fn test_config_names() {
        let unit: TimeUnit = serde_json::from_str("\"seconds\"").unwrap();
        assert_eq!(unit, TimeUnit::Seconds);
    }
}
