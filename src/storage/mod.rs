// Column encoding for relational storage

mod column;

pub use column::{ColumnValue, RawColumn};
