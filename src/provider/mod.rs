//! Where the scaling engine gets its decoded tables from.

mod dump_dir;
mod memory;

pub use dump_dir::*;
pub use memory::*;

use std::sync::Arc;

use crate::error::Result;
use crate::model::Table;
use crate::schema::FileType;

/// Source of decoded tables. All tables handed out by one provider must come
/// from the same upstream snapshot; they are shared and never mutated.
pub trait DataProvider {
    /// Fails with `TableNotRegistered` (or the loader's own error) rather than
    /// returning an empty table when the file type is unavailable.
    fn table(&self, file_type: FileType) -> Result<Arc<Table>>;
}

impl<P: DataProvider + ?Sized> DataProvider for &P {
    fn table(&self, file_type: FileType) -> Result<Arc<Table>> {
        (**self).table(file_type)
    }
}

impl<P: DataProvider + ?Sized> DataProvider for Arc<P> {
    fn table(&self, file_type: FileType) -> Result<Arc<Table>> {
        (**self).table(file_type)
    }
}
