//! Schema module for staystat tables.
//!
//! This module contains the column and schema definitions a `Table` is
//! validated against.

mod column;
mod table_schema;

pub use column::Column;
pub use table_schema::{Schema, SchemaBuilder};
