pub mod cli;
pub mod download;
pub mod error;
pub mod filter;
pub mod model;
pub mod parser;
pub mod profile;
pub mod provider;
pub mod scaling;
pub mod schema;

pub use cli::{Cli, Commands};
pub use error::{Error, Result};
pub use model::{SimcItem, SimcSpell, Table};
pub use profile::ItemRef;
pub use provider::{DataProvider, DumpDirProvider, MemoryProvider};
pub use scaling::ScalingEngine;
