//! Tests for ServiceStats snapshots and call tracking

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use vigil_metrics::{timed, ServiceStats, StatsConfig, SERVICE_VALUE_NAMES};
use vigil_stats::{MetricError, Numeric, Stats, StatsError, TimeUnit};

fn config(name: &str) -> StatsConfig {
    StatsConfig {
        name: name.to_string(),
        intervals: vec!["A".to_string(), "B".to_string()],
        default_unit: TimeUnit::Microseconds,
    }
}

// =============================================================================
// Snapshots
// =============================================================================

mod snapshots {
    use super::*;

    #[test]
    fn contains_every_declared_metric() {
        let stats = ServiceStats::new(&config("checkout"));
        let snapshot = stats.create_snapshot(Some("A"), "shop-1").unwrap();

        assert_eq!(snapshot.name(), "checkout");
        assert_eq!(snapshot.interface_tag(), "ServiceStats");
        assert_eq!(snapshot.producer_id(), "shop-1");

        let mut keys: Vec<&str> = snapshot.properties().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["AverageTime", "CurrentRequests", "Errors", "MaxTime", "TotalRequests", "TotalTime"]
        );
    }

    #[test]
    fn intervals_diverge_after_reset() {
        let stats = ServiceStats::new(&config("checkout"));
        stats.notify_request_begin();
        stats.notify_request_finished(Duration::from_millis(1));
        stats.reset_interval("A").unwrap();
        stats.notify_request_begin();
        stats.notify_request_finished(Duration::from_millis(3));

        let a = stats.create_snapshot(Some("A"), "shop-1").unwrap();
        let b = stats.create_snapshot(Some("B"), "shop-1").unwrap();
        let total = stats.create_snapshot(None, "shop-1").unwrap();

        assert_eq!(a.property("TotalRequests"), Some(Numeric::Long(1)));
        assert_eq!(b.property("TotalRequests"), Some(Numeric::Long(2)));
        assert_eq!(total.property("TotalRequests"), Some(Numeric::Long(2)));
        assert_eq!(a.property("AverageTime"), Some(Numeric::Double(3_000_000.0)));
        assert_eq!(b.property("AverageTime"), Some(Numeric::Double(2_000_000.0)));
    }

    #[test]
    fn unknown_interval_aborts() {
        let stats = ServiceStats::new(&config("checkout"));
        match stats.create_snapshot(Some("1d"), "shop-1") {
            Err(StatsError::SnapshotConstruction(MetricError::UnknownInterval { interval })) => {
                assert_eq!(interval, "1d");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn added_interval_starts_from_zero() {
        let stats = ServiceStats::new(&config("checkout"));
        stats.notify_request_begin();
        stats.notify_request_finished(Duration::from_millis(4));
        assert!(stats.create_snapshot(Some("C"), "shop-1").is_err());

        stats.add_interval("C");
        let snapshot = stats.create_snapshot(Some("C"), "shop-1").unwrap();
        assert_eq!(snapshot.property("TotalRequests"), Some(Numeric::Long(0)));
        assert_eq!(snapshot.property("MaxTime"), Some(Numeric::Long(0)));
        assert_eq!(stats.interval_names(), vec!["A", "B", "C"]);

        stats.notify_request_begin();
        stats.notify_request_finished(Duration::from_millis(1));
        assert_eq!(stats.max_time(Some("C")), Ok(1_000_000));
        assert_eq!(stats.max_time(Some("A")), Ok(4_000_000));
    }

    #[test]
    fn exports_as_json() {
        let stats = ServiceStats::new(&config("checkout"));
        stats.notify_request_begin();

        let json = stats
            .create_snapshot(None, "shop-1")
            .unwrap()
            .to_json_compact()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "checkout");
        assert_eq!(value["producerId"], "shop-1");
        assert_eq!(value["properties"]["CurrentRequests"], 1);
    }

    #[test]
    fn snapshots_while_updating() {
        let stats = Arc::new(ServiceStats::new(&config("busy")));
        let writers: Vec<_> = (0..4)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..500 {
                        stats.notify_request_begin();
                        stats.notify_request_finished(Duration::from_nanos(10));
                    }
                })
            })
            .collect();

        for _ in 0..50 {
            let snapshot = stats.create_snapshot(Some("B"), "busy-1").unwrap();
            assert_eq!(snapshot.len(), 6);
        }
        for writer in writers {
            writer.join().unwrap();
        }

        let snapshot = stats.create_snapshot(Some("B"), "busy-1").unwrap();
        assert_eq!(snapshot.property("TotalRequests"), Some(Numeric::Long(2_000)));
        assert_eq!(snapshot.property("TotalTime"), Some(Numeric::Long(20_000)));
        assert_eq!(snapshot.property("CurrentRequests"), Some(Numeric::Long(0)));
    }
}

// =============================================================================
// Call executions
// =============================================================================

mod executions {
    use super::*;

    #[test]
    fn finished_execution_is_counted() {
        let stats = ServiceStats::new(&config("checkout"));
        {
            let mut execution = stats.create_call_execution().unwrap();
            execution.start_execution();
            assert_eq!(stats.current_requests(), 1);
            execution.finish_execution(Some("ok"));
        }

        assert_eq!(stats.total_requests(None), Ok(1));
        assert_eq!(stats.current_requests(), 0);
        assert_eq!(stats.errors(None), Ok(0));
    }

    #[test]
    fn aborted_execution_is_an_error() {
        let stats = ServiceStats::new(&config("checkout"));
        let mut execution = stats.create_call_execution().unwrap();
        execution.start_execution();
        execution.abort_execution();
        execution.abort_execution();
        drop(execution);

        assert_eq!(stats.errors(Some("A")), Ok(1));
        assert_eq!(stats.total_requests(Some("A")), Ok(1));
        assert_eq!(stats.current_requests(), 0);
    }

    #[test]
    fn unstarted_execution_records_nothing() {
        let stats = ServiceStats::new(&config("checkout"));
        let mut execution = stats.create_call_execution().unwrap();
        execution.finish_execution(None);
        drop(execution);

        assert_eq!(stats.total_requests(None), Ok(0));
        assert_eq!(stats.errors(None), Ok(0));
    }

    #[test]
    fn timed_block_records_one_call() {
        let stats = ServiceStats::new(&config("checkout"));
        let answer = timed!(stats, { 6 * 7 });

        assert_eq!(answer, 42);
        assert_eq!(stats.total_requests(None), Ok(1));
        assert_eq!(stats.current_requests(), 0);
    }
}

// =============================================================================
// Rendering
// =============================================================================

mod rendering {
    use super::*;

    #[test]
    fn lists_all_value_names() {
        let stats = ServiceStats::new(&config("checkout"));
        assert_eq!(stats.available_value_names(), SERVICE_VALUE_NAMES);
    }

    #[test]
    fn stats_string_uses_unit() {
        let stats = ServiceStats::new(&config("checkout"));
        stats.notify_request_begin();
        stats.notify_request_finished(Duration::from_millis(2));

        assert_eq!(
            stats.to_stats_string_with(Some("A"), TimeUnit::Milliseconds),
            "checkout TR: 1, TT: 2, CR: 0, ERR: 0, MAX: 2, AVG: 2.000 [ms]"
        );
        assert_eq!(
            stats.to_stats_string(),
            "checkout TR: 1, TT: 2000, CR: 0, ERR: 0, MAX: 2000, AVG: 2000.000 [us]"
        );
        assert_eq!(
            stats.to_stats_string_for("B"),
            "checkout TR: 1, TT: 2000, CR: 0, ERR: 0, MAX: 2000, AVG: 2000.000 [us]"
        );
        assert!(stats.to_stats_string_in(TimeUnit::Seconds).ends_with("[s]"));
    }

    #[test]
    fn unknown_interval_renders_none() {
        let stats = ServiceStats::new(&config("checkout"));
        let rendered = stats.to_stats_string_for("1d");
        assert!(rendered.contains("TR: none"));
        assert!(rendered.contains("CR: 0"));
    }
}
