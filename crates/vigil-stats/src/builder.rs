//! Snapshot construction

use crate::{MetricDescriptor, MetricError, Numeric, Stats, StatsError, StatsResult, StatsSnapshot};
use std::collections::HashMap;

/// Read every descriptor in `metrics` from `stats`
///
/// Aborts on the first failing accessor and on a repeated name.
pub(crate) fn read_all<S>(
    metrics: &[MetricDescriptor<S>],
    stats: &S,
    interval: Option<&str>,
) -> Result<HashMap<String, Numeric>, MetricError> {
    let mut properties = HashMap::with_capacity(metrics.len());
    for metric in metrics {
        let value = metric.read(stats, interval)?;
        if properties.insert(metric.name().to_string(), value).is_some() {
            return Err(MetricError::Duplicate {
                metric: metric.name().to_string(),
            });
        }
    }
    Ok(properties)
}

/// Capture a snapshot of `stats` for `interval`
///
/// Either every declared metric is captured or the whole attempt fails with
/// [`StatsError::SnapshotConstruction`].
pub fn build_snapshot<S: Stats + ?Sized>(
    stats: &S,
    interval: Option<&str>,
    producer_id: &str,
) -> StatsResult<StatsSnapshot> {
    let properties = stats.read_metrics(interval).map_err(|e| {
        tracing::warn!(
            stats = stats.name(),
            producer = producer_id,
            interval = interval.unwrap_or("default"),
            error = %e,
            "snapshot aborted"
        );
        StatsError::SnapshotConstruction(e)
    })?;

    tracing::debug!(
        stats = stats.name(),
        producer = producer_id,
        interval = interval.unwrap_or("default"),
        properties = properties.len(),
        "snapshot created"
    );

    Ok(StatsSnapshot::new(
        stats.name(),
        stats.interface_tag(),
        producer_id,
        properties,
    ))
}
