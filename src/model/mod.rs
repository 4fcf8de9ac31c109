pub mod built;
pub mod raw;
pub mod table;

pub use built::*;
pub use raw::*;
pub use table::Table;
