pub mod block;
pub mod decoder;
pub mod row;

pub use decoder::{decode, decode_text, RawDumps};
pub use row::{classify, split_line, DumpContext, Fields, RowKind, SplitLine};
