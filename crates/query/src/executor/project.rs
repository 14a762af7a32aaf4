//! Project executor.

use alloc::string::String;
use alloc::vec::Vec;
use staystat_core::schema::Schema;
use staystat_core::{Result, Row, Table};

/// Project executor - selects named columns in the given order.
pub struct ProjectExecutor {
    columns: Vec<String>,
}

impl ProjectExecutor {
    /// Creates a new project executor.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Creates a project executor from column names.
    pub fn by_names(columns: &[&str]) -> Self {
        Self::new(columns.iter().map(|c| String::from(*c)).collect())
    }

    /// Executes the projection on the input table.
    pub fn execute(&self, input: &Table) -> Result<Table> {
        let indices = self
            .columns
            .iter()
            .map(|name| input.column_index(name))
            .collect::<Result<Vec<usize>>>()?;

        let schema = Schema::new(
            indices
                .iter()
                .map(|&idx| input.schema().columns()[idx].clone())
                .collect(),
        )?;

        let rows = input
            .rows()
            .iter()
            .map(|row| Row::new(indices.iter().map(|&idx| row.values()[idx].clone()).collect()))
            .collect();

        Ok(Table::from_parts(schema, rows))
    }
}
