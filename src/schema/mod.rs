pub mod enums;
pub mod tables;
pub mod types;

pub use enums::*;
pub use tables::*;
pub use types::*;
