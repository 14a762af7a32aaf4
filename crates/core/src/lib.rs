//! staystat Core - Core types for the staystat listings analytics workspace.
//!
//! This crate provides the foundational types shared by the aggregation
//! engine and the dashboard:
//!
//! - `DataType`: Supported column types (Boolean, Int32, Int64, Float64, String)
//! - `Value`: Runtime values held in table cells
//! - `Row`: An ordered record of values
//! - `schema`: Column and schema definitions
//! - `Table`: An immutable schema-checked collection of rows
//! - `Error`: Error types for table construction and aggregation
//!
//! # Example
//!
//! ```rust
//! use staystat_core::{DataType, Row, Table, Value};
//! use staystat_core::schema::SchemaBuilder;
//!
//! let schema = SchemaBuilder::new()
//!     .add_column("room_type", DataType::String)
//!     .unwrap()
//!     .add_column("price", DataType::Float64)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let table = Table::new(schema, vec![
//!     Row::new(vec![Value::from("Entire home"), Value::Float64(120.0)]),
//!     Row::new(vec![Value::from("Private room"), Value::Float64(45.0)]),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.value(1, "price"), Some(&Value::Float64(45.0)));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod row;
pub mod schema;
mod table;
mod types;
mod value;

pub use error::{Error, Result};
pub use row::Row;
pub use table::Table;
pub use types::DataType;
pub use value::Value;
