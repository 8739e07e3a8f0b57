//! Attribute-major snapshot form.
//!
//! The fast-reload document consumed by reconciliation: the in-memory
//! table serialized as-is. Round-tripping reproduces the identical
//! logical table.

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::table::ConfigurationTable;

#[derive(Serialize, Deserialize)]
struct SnapshotDoc {
    attributes: Vec<String>,
    treatments: Vec<String>,
    values: Vec<Vec<String>>,
}

pub fn to_snapshot_json(table: &ConfigurationTable) -> String {
    let doc = SnapshotDoc {
        attributes: table.attributes().to_vec(),
        treatments: table.treatments().to_vec(),
        values: table.rows().to_vec(),
    };
    // Struct-to-JSON with owned data cannot fail.
    serde_json::to_string_pretty(&doc).expect("snapshot serialization")
}

pub fn from_snapshot_json(input: &str) -> Result<ConfigurationTable, TableError> {
    let doc: SnapshotDoc =
        serde_json::from_str(input).map_err(|e| TableError::Parse(e.to_string()))?;
    ConfigurationTable::from_parts(doc.attributes, doc.treatments, doc.values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ConfigurationTable {
        ConfigurationTable::from_parts(
            vec!["PriorHarvestDate".into(), "CurrentHarvestDate".into()],
            vec!["S1_T1".into()],
            vec![vec!["2020-02-01".into()], vec!["2020-03-01".into()]],
        )
        .unwrap()
    }

    #[test]
    fn round_trips_to_equal_table() {
        let original = table();
        let reloaded = from_snapshot_json(&to_snapshot_json(&original)).unwrap();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn snapshot_is_idempotent() {
        assert_eq!(to_snapshot_json(&table()), to_snapshot_json(&table()));
    }

    #[test]
    fn reload_revalidates_invariants() {
        let doctored = r#"{
            "attributes": ["A"],
            "treatments": ["T1", "T1"],
            "values": [["1", "2"]]
        }"#;
        let err = from_snapshot_json(doctored).unwrap_err();
        assert!(matches!(err, TableError::DuplicateTreatment { .. }));
    }
}
