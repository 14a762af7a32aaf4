//! Group aggregator executor.

use crate::statistic::Statistic;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::vec::Vec;
use staystat_core::schema::{Column, Schema};
use staystat_core::{Error, Result, Row, Table, Value};

/// Partitions a table by grouping key and reduces the measure column of each
/// partition with one statistic.
///
/// The output has the grouping columns followed by one column named after the
/// statistic, one row per distinct key, ordered by key.
pub struct GroupAggregator {
    /// Group by column indices.
    group_by: Vec<usize>,
    /// Measure column index.
    measure: usize,
    /// Statistic to compute.
    statistic: Statistic,
}

impl GroupAggregator {
    /// Creates a new group aggregator.
    pub fn new(group_by: Vec<usize>, measure: usize, statistic: Statistic) -> Self {
        Self {
            group_by,
            measure,
            statistic,
        }
    }

    /// Returns the output schema for an input with the given schema.
    pub fn output_schema(&self, input: &Schema) -> Result<Schema> {
        let column_at = |idx: usize| {
            input.column(idx).ok_or_else(|| {
                Error::invalid_argument(format!("column index {} out of range", idx))
            })
        };

        let mut columns: Vec<Column> = Vec::with_capacity(self.group_by.len() + 1);
        for &idx in &self.group_by {
            columns.push(column_at(idx)?.clone());
        }
        let measure_type = column_at(self.measure)?.data_type();
        columns.push(
            Column::new(self.statistic.name(), self.statistic.output_type(measure_type))
                .nullable(true),
        );
        Schema::new(columns)
    }

    /// Executes the aggregation on the input table.
    pub fn execute(&self, input: &Table) -> Result<Table> {
        let schema = self.output_schema(input.schema())?;

        let mut groups: BTreeMap<Vec<&Value>, Vec<&Value>> = BTreeMap::new();
        for row in input.rows() {
            let key: Vec<&Value> = self.group_by.iter().map(|&idx| &row.values()[idx]).collect();
            groups
                .entry(key)
                .or_default()
                .push(&row.values()[self.measure]);
        }

        let rows = groups
            .into_iter()
            .map(|(key, measures)| {
                let mut values = Vec::with_capacity(key.len() + 1);
                values.extend(key.into_iter().cloned());
                values.push(self.statistic.reduce(measures));
                Row::new(values)
            })
            .collect();

        Ok(Table::from_parts(schema, rows))
    }
}
