use std::collections::HashMap;
use std::sync::Arc;

use super::DataProvider;
use crate::error::{Error, Result};
use crate::model::Table;
use crate::parser::{decode, RawDumps};
use crate::schema::FileType;

/// Provider over tables that are already decoded
#[derive(Debug, Default, Clone)]
pub struct MemoryProvider {
    tables: HashMap<FileType, Arc<Table>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_type: FileType, table: Table) {
        self.tables.insert(file_type, Arc::new(table));
    }

    /// Decode `file_types` from one set of dumps
    pub fn from_dumps(dumps: &RawDumps, file_types: &[FileType]) -> Result<Self> {
        let mut provider = Self::new();
        for file_type in file_types {
            provider.insert(*file_type, decode(*file_type, dumps)?);
        }
        Ok(provider)
    }

    pub fn registered(&self) -> impl Iterator<Item = FileType> + '_ {
        self.tables.keys().copied()
    }
}

impl DataProvider for MemoryProvider {
    fn table(&self, file_type: FileType) -> Result<Arc<Table>> {
        self.tables
            .get(&file_type)
            .cloned()
            .ok_or(Error::TableNotRegistered(file_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_table_fails() {
        let mut provider = MemoryProvider::new();
        provider.insert(FileType::GameDataVersion, Table::Version("9.0.5".into()));

        assert_eq!(
            provider.table(FileType::GameDataVersion).unwrap().version().unwrap(),
            "9.0.5"
        );
        let err = provider.table(FileType::SpellData).unwrap_err();
        assert!(matches!(err, Error::TableNotRegistered(FileType::SpellData)));
    }

    #[test]
    fn test_from_dumps() {
        let dumps = RawDumps::new()
            .with("client_data_version.inc", "#define CLIENT_DATA_WOW_VERSION \"9.1.0.40000\"")
            .with("real_ppm.inc", "{ 339343, 1, 0, 0.000000 },\n");
        let provider =
            MemoryProvider::from_dumps(&dumps, &[FileType::GameDataVersion, FileType::RppmData])
                .unwrap();
        assert_eq!(provider.registered().count(), 2);
        assert_eq!(provider.table(FileType::RppmData).unwrap().len(), 1);
    }
}
