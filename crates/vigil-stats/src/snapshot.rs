//! Point-in-time snapshots of statistics objects

use crate::Numeric;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable capture of a statistics object's metrics at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    name: String,
    interface_tag: String,
    producer_id: String,
    properties: HashMap<String, Numeric>,
}

impl StatsSnapshot {
    /// Create a snapshot from already captured values
    pub fn new(
        name: impl Into<String>,
        interface_tag: impl Into<String>,
        producer_id: impl Into<String>,
        properties: HashMap<String, Numeric>,
    ) -> Self {
        Self {
            name: name.into(),
            interface_tag: interface_tag.into(),
            producer_id: producer_id.into(),
            properties,
        }
    }

    /// Name of the statistics object the snapshot was taken from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type tag of the statistics object
    pub fn interface_tag(&self) -> &str {
        &self.interface_tag
    }

    /// Id of the producer owning the statistics object
    pub fn producer_id(&self) -> &str {
        &self.producer_id
    }

    /// All captured properties
    pub fn properties(&self) -> &HashMap<String, Numeric> {
        &self.properties
    }

    /// Value of one property
    pub fn property(&self, name: &str) -> Option<Numeric> {
        self.properties.get(name).copied()
    }

    /// Number of captured properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether no property was captured
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Export snapshot as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export snapshot as compact JSON string
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatsSnapshot {
        let mut properties = HashMap::new();
        properties.insert("Requests".to_string(), Numeric::Long(100));
        properties.insert("Average".to_string(), Numeric::Double(1.5));
        StatsSnapshot::new("orders", "ServiceStats", "orders-api", properties)
    }

    #[test]
    fn test_accessors() {
        let snapshot = sample();
        assert_eq!(snapshot.name(), "orders");
        assert_eq!(snapshot.interface_tag(), "ServiceStats");
        assert_eq!(snapshot.producer_id(), "orders-api");
        assert_eq!(snapshot.property("Requests"), Some(Numeric::Long(100)));
        assert_eq!(snapshot.property("Missing"), None);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = sample();
        let json = snapshot.to_json().unwrap();

        assert!(json.contains("\"interfaceTag\": \"ServiceStats\""));
        assert!(json.contains("\"producerId\": \"orders-api\""));
        assert!(json.contains("\"Requests\": 100"));

        let compact = snapshot.to_json_compact().unwrap();
        let parsed: StatsSnapshot = serde_json::from_str(&compact).unwrap();
        assert_eq!(parsed.name(), "orders");
        // JSON does not carry the integer width
        assert_eq!(parsed.property("Requests").and_then(|v| v.as_i64()), Some(100));
        assert_eq!(parsed.property("Average"), Some(Numeric::Double(1.5)));
    }
}
