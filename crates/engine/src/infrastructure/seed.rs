//! Seed snapshots for offline mode.
//!
//! A seed file holds the same JSON the inventory API returns from its tree
//! endpoint: an array of warehouses with nested zones, racks, levels and bins.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use stockyard_domain::{Bin, BinCode, Level, Rack, Warehouse, Zone};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Could not read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Seed file {path} is not a valid snapshot: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a snapshot from a JSON file.
pub fn load_seed(path: &Path) -> Result<Vec<Warehouse>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let warehouses: Vec<Warehouse> =
        serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), warehouses = warehouses.len(), "Loaded seed snapshot");
    Ok(warehouses)
}

/// Small built-in tree used when offline mode has no seed file.
pub fn demo_seed(now: DateTime<Utc>) -> Vec<Warehouse> {
    let bin = |n: u32, quantity: u32| {
        let full_code = BinCode::new("WH1", "Z-01", "R-01", "L-01").generated(n);
        Bin::new(full_code.clone(), full_code, format!("Bin {}", n), now).with_quantity(quantity)
    };

    let receiving = Zone::new("Z-01", "Good Condition").with_rack(
        Rack::new("R-01", "Rack A")
            .with_level(
                Level::new("L-01", "Floor")
                    .with_bin(bin(1, 24))
                    .with_bin(bin(2, 0)),
            )
            .with_level(Level::new("L-02", "Upper")),
    );
    let damaged = Zone::new("Z-02", "Damaged");

    let mut warehouse = Warehouse::new("WH1", "Main Warehouse")
        .with_zone(receiving)
        .with_zone(damaged);
    warehouse.child_sequence = 2;
    if let Some(zone) = warehouse.zones.first_mut() {
        zone.child_sequence = 1;
        if let Some(rack) = zone.racks.first_mut() {
            rack.child_sequence = 2;
            if let Some(level) = rack.levels.first_mut() {
                level.child_sequence = 2;
            }
        }
    }
    vec![warehouse]
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use stockyard_domain::LocationTree;

    use super::*;

    #[test]
    fn loads_snapshot_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"id":"w1","code":"WH1","name":"Main","zones":[{{"id":"z1","code":"Z-01","name":"Bulk"}}]}}]"#
        )
        .expect("write");

        let warehouses = load_seed(file.path()).expect("seed");
        assert_eq!(warehouses.len(), 1);
        assert_eq!(warehouses[0].zones[0].code, "Z-01");
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_seed(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, SeedError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write");
        let err = load_seed(file.path()).expect_err("malformed");
        assert!(matches!(err, SeedError::Parse { .. }));
    }

    #[test]
    fn demo_seed_is_a_valid_tree() {
        let tree = LocationTree::init(demo_seed(Utc::now())).expect("valid");
        let bins = &tree.warehouses()[0].zones[0].racks[0].levels[0].bins;
        assert_eq!(bins[0].full_code, "WH1-Z-01-R-01-L-01-B01");
    }
}
