use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tracing::{debug, info, warn};

use super::DataProvider;
use crate::error::Result;
use crate::model::Table;
use crate::parser::{decode, RawDumps};
use crate::schema::FileType;

const PARSED_DIR: &str = "parsed";

/// Provider over one directory of raw dumps (one upstream snapshot).
/// Tables are decoded on first use and memoised.
pub struct DumpDirProvider {
    dir: PathBuf,
    persist_parsed: bool,
    tables: Mutex<HashMap<FileType, Arc<Table>>>,
}

impl DumpDirProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            persist_parsed: false,
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// Also keep decoded tables as JSON under `<dir>/parsed`
    pub fn persist_parsed(mut self, persist: bool) -> Self {
        self.persist_parsed = persist;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn parsed_path(&self, file_type: FileType) -> PathBuf {
        self.dir
            .join(PARSED_DIR)
            .join(format!("{}.json", file_type.name()))
    }

    fn load(&self, file_type: FileType) -> Result<Table> {
        let parsed = self.parsed_path(file_type);
        if self.persist_parsed && self.parsed_is_fresh(file_type, &parsed) {
            debug!("reading parsed {} from {:?}", file_type, parsed);
            match fs::read_to_string(&parsed).map(|s| serde_json::from_str::<Table>(&s)) {
                Ok(Ok(table)) => return Ok(table),
                Ok(Err(e)) => warn!("ignoring unreadable {:?}: {}", parsed, e),
                Err(e) => warn!("ignoring unreadable {:?}: {}", parsed, e),
            }
        }

        let dumps = RawDumps::load(&self.dir, file_type)?;
        let table = decode(file_type, &dumps)?;
        info!("decoded {} ({} rows)", file_type, table.len());

        if self.persist_parsed {
            if let Some(parent) = parsed.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&parsed, serde_json::to_string(&table)?)?;
        }
        Ok(table)
    }

    /// A parsed file is reusable only when it is newer than every raw source
    fn parsed_is_fresh(&self, file_type: FileType, parsed: &Path) -> bool {
        let Some(parsed_time) = modified(parsed) else {
            return false;
        };
        file_type
            .source_files()
            .iter()
            .all(|source| match modified(&self.dir.join(source)) {
                Some(raw_time) => raw_time <= parsed_time,
                None => false,
            })
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

impl DataProvider for DumpDirProvider {
    fn table(&self, file_type: FileType) -> Result<Arc<Table>> {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(table) = tables.get(&file_type) {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(self.load(file_type)?);
        tables.insert(file_type, Arc::clone(&table));
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_missing_dump_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = DumpDirProvider::new(dir.path());
        let err = provider.table(FileType::GemData).unwrap_err();
        assert!(matches!(err, Error::MissingDump(_)));
    }

    #[test]
    fn test_decodes_once_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("gem_properties.inc"),
            "static gem_property_data_t __gem_property_data[1] = {\n  { 3840, 6591, 14, 0 },\n};\n",
        )
        .unwrap();

        let provider = DumpDirProvider::new(dir.path()).persist_parsed(true);
        let first = provider.table(FileType::GemData).unwrap();
        let second = provider.table(FileType::GemData).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.gem_properties().unwrap()[0].enchant_id, 6591);

        let parsed = provider.parsed_path(FileType::GemData);
        assert!(parsed.exists());

        // a fresh provider reuses the parsed JSON
        let reloaded = DumpDirProvider::new(dir.path()).persist_parsed(true);
        assert_eq!(*reloaded.table(FileType::GemData).unwrap(), *first);
    }
}
