//! Tests for scan-state persistence

#[cfg(test)]
mod tests {
    use super::super::StateStore;
    use crate::types::ScanMode;
    use tempfile::tempdir;

    #[test]
    fn test_checkpoint_round_trip() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));

        store.save(1_700_000_000_000, ScanMode::Incremental).unwrap();

        let state = store.load().unwrap();
        assert_eq!(state.last_run_timestamp, 1_700_000_000_000);
        assert_eq!(state.last_scan_type, ScanMode::Incremental);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(dir.path().join("nope.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_corrupt_file_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json {{").unwrap();

        let store = StateStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(dir.path().join("nested").join("deeper").join("state.json"));

        store.save(42, ScanMode::Day).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap().last_run_timestamp, 42);
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));

        store.save(1, ScanMode::Day).unwrap();
        store.save(2, ScanMode::Hour).unwrap();

        let state = store.load().unwrap();
        assert_eq!(state.last_run_timestamp, 2);
        assert_eq!(state.last_scan_type, ScanMode::Hour);
    }

    #[test]
    fn test_state_file_layout() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        store.save(1_700_000_000_000, ScanMode::Day).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["last_run_timestamp"], 1_700_000_000_000i64);
        assert_eq!(value["last_scan_type"], "24h");
    }
}
