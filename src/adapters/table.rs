//! Adjustment table adapters: built-in defaults and JSON files.

use std::path::PathBuf;

use crate::domain::AdjustmentTable;
use crate::ports::AdjustmentSource;
use crate::MementoError;

/// Largest table file accepted; real tables are well under 4 KiB.
const MAX_TABLE_FILE_BYTES: u64 = 64 * 1024;

/// The compiled-in default figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTable;

impl AdjustmentSource for BuiltinTable {
    fn describe(&self) -> String {
        "built-in adjustment table".to_string()
    }

    fn load(&self) -> crate::Result<AdjustmentTable> {
        Ok(AdjustmentTable::default())
    }
}

/// A JSON adjustment table on disk.
///
/// Keys mirror [`AdjustmentTable`]'s kebab-case fields. Missing keys keep the
/// built-in value; unknown keys are rejected.
#[derive(Debug, Clone)]
pub struct JsonTableFile {
    path: PathBuf,
}

impl JsonTableFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AdjustmentSource for JsonTableFile {
    fn describe(&self) -> String {
        format!("adjustment table {:?}", self.path)
    }

    fn load(&self) -> crate::Result<AdjustmentTable> {
        let size = std::fs::metadata(&self.path)?.len();
        if size > MAX_TABLE_FILE_BYTES {
            return Err(MementoError::InvalidTable(format!(
                "{:?} is {size} bytes, max {MAX_TABLE_FILE_BYTES}",
                self.path
            )));
        }

        let content = std::fs::read_to_string(&self.path)?;
        let table = AdjustmentTable::from_json_str(&content)?;

        tracing::info!(
            "Loaded adjustment table from {:?} (baseline {} years)",
            self.path,
            table.baseline_years
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_is_default() {
        let table = BuiltinTable.load().expect("Should load");
        assert_eq!(table, AdjustmentTable::default());
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("table.json");
        std::fs::write(&path, r#"{"baseline-years": 80.0, "left-handed": 0.0}"#).expect("write");

        let source = JsonTableFile::new(&path);
        let table = source.load().expect("Should load");
        assert_eq!(table.baseline_years, 80.0);
        assert_eq!(table.left_handed, 0.0);
        assert_eq!(table.religious, 5.0);
        assert!(source.describe().contains("table.json"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = JsonTableFile::new(dir.path().join("absent.json"))
            .load()
            .expect_err("Should fail");
        assert!(matches!(err, MementoError::Io(_)));
    }

    #[test]
    fn test_unknown_key_in_file_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("table.json");
        std::fs::write(&path, r#"{"vegan": 2.0}"#).expect("write");

        let err = JsonTableFile::new(&path).load().expect_err("Should fail");
        assert!(matches!(err, MementoError::Serialization(_)));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("table.json");
        let padding = " ".repeat((MAX_TABLE_FILE_BYTES + 1) as usize);
        std::fs::write(&path, format!("{{}}{padding}")).expect("write");

        let err = JsonTableFile::new(&path).load().expect_err("Should fail");
        assert!(matches!(err, MementoError::InvalidTable(_)));
    }
}
