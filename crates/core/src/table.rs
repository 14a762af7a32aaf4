//! In-memory table: a schema plus the rows that conform to it.

use crate::error::{Error, Result};
use crate::row::Row;
use crate::schema::{Column, Schema};
use crate::value::Value;
use alloc::format;
use alloc::vec::Vec;

/// An immutable, ordered collection of rows under a schema.
///
/// Tables are never modified in place: filtering, projecting or adding a
/// column returns a new table.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table, checking every row against the schema.
    ///
    /// Each row must have one value per column; non-null values must match
    /// the column type and nulls are only allowed in nullable columns.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self> {
        for row in &rows {
            check_row(&schema, row)?;
        }
        Ok(Self { schema, rows })
    }

    /// Creates a table from rows already known to match the schema.
    ///
    /// Used by operators whose output shape is derived from a validated input.
    pub fn from_parts(schema: Schema, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == schema.len()));
        Self { schema, rows }
    }

    /// Creates a table with no rows.
    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Returns the schema.
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the rows.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the table and returns its schema and rows.
    pub fn into_parts(self) -> (Schema, Vec<Row>) {
        (self.schema, self.rows)
    }

    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Resolves a column index by name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.schema.index_of(name)
    }

    /// Iterates over the values of one column.
    pub fn column_values(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row.values()[idx]))
    }

    /// Gets the value of a named column in the given row.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.schema.get_column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Returns a new table holding only the rows matching `predicate`.
    pub fn filter<F>(&self, predicate: F) -> Table
    where
        F: Fn(&Row) -> bool,
    {
        let rows = self.rows.iter().filter(|r| predicate(r)).cloned().collect();
        Self::from_parts(self.schema.clone(), rows)
    }

    /// Returns a new table with `column` appended, one value per row.
    pub fn with_column(&self, column: Column, values: Vec<Value>) -> Result<Table> {
        if values.len() != self.rows.len() {
            return Err(Error::invalid_schema(format!(
                "Column {} has {} values for {} rows",
                column.name(),
                values.len(),
                self.rows.len()
            )));
        }
        let mut columns = self.schema.columns().to_vec();
        columns.push(column);
        let schema = Schema::new(columns)?;

        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut row_values = Vec::with_capacity(row.len() + 1);
                row_values.extend(row.values().iter().cloned());
                row_values.push(value);
                Row::new(row_values)
            })
            .collect();
        Table::new(schema, rows)
    }
}

fn check_row(schema: &Schema, row: &Row) -> Result<()> {
    if row.len() != schema.len() {
        return Err(Error::invalid_schema(format!(
            "Row has {} values, schema has {} columns",
            row.len(),
            schema.len()
        )));
    }
    for (column, value) in schema.columns().iter().zip(row.values()) {
        match value.data_type() {
            None if !column.is_nullable() => {
                return Err(Error::null_constraint(column.name()));
            }
            Some(got) if got != column.data_type() => {
                return Err(Error::type_mismatch(
                    column.name(),
                    column.data_type().name(),
                    got,
                ));
            }
            _ => {}
        }
    }
    Ok(())
}
