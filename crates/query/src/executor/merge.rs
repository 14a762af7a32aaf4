//! Full outer merge of two tables on their leading key columns.

use alloc::format;
use alloc::vec::Vec;
use hashbrown::HashMap;
use log::warn;
use staystat_core::schema::{Column, Schema};
use staystat_core::{Error, Result, Row, Table, Value};

/// Full outer join keyed by the first `key_count` columns of both inputs.
///
/// The output has the left columns followed by the right non-key columns.
/// Left rows keep their order; keys found only on the right are appended in
/// right order. A key missing on one side gets nulls for that side's columns.
///
/// Key components compare with `Value` equality, so `Null` matches `Null`.
pub struct OuterMerge {
    key_count: usize,
}

impl OuterMerge {
    /// Creates a merge over the leading `key_count` columns.
    pub fn new(key_count: usize) -> Self {
        Self { key_count }
    }

    /// Executes the merge.
    pub fn execute(&self, left: &Table, right: &Table) -> Result<Table> {
        let schema = self.output_schema(left.schema(), right.schema())?;
        let left_width = left.column_count();
        let right_extra = right.column_count() - self.key_count;

        // Build phase: index the right side by key
        let mut right_index: HashMap<&[Value], usize> = HashMap::with_capacity(right.len());
        for (idx, row) in right.rows().iter().enumerate() {
            let key = &row.values()[..self.key_count];
            if right_index.insert(key, idx).is_some() {
                return Err(Error::invalid_argument(format!(
                    "duplicate merge key in right input: {:?}",
                    key
                )));
            }
        }

        // Probe phase
        let mut matched = alloc::vec![false; right.len()];
        let mut left_only = 0usize;
        let mut rows = Vec::with_capacity(left.len().max(right.len()));

        for left_row in left.rows() {
            let key = &left_row.values()[..self.key_count];
            let mut values = Vec::with_capacity(left_width + right_extra);
            values.extend(left_row.values().iter().cloned());

            match right_index.get(key) {
                Some(&right_idx) => {
                    matched[right_idx] = true;
                    let right_row = &right.rows()[right_idx];
                    values.extend(right_row.values()[self.key_count..].iter().cloned());
                }
                None => {
                    left_only += 1;
                    values.resize(left_width + right_extra, Value::Null);
                }
            }
            rows.push(Row::new(values));
        }

        let mut right_only = 0usize;
        for (right_row, _) in right.rows().iter().zip(&matched).filter(|(_, m)| !**m) {
            right_only += 1;
            let mut values = Vec::with_capacity(left_width + right_extra);
            values.extend(right_row.values()[..self.key_count].iter().cloned());
            values.resize(left_width, Value::Null);
            values.extend(right_row.values()[self.key_count..].iter().cloned());
            rows.push(Row::new(values));
        }

        if left_only > 0 || right_only > 0 {
            warn!(
                "outer merge key sets diverge: {} keys only on the left, {} only on the right",
                left_only, right_only
            );
        }

        Ok(Table::from_parts(schema, rows))
    }

    fn output_schema(&self, left: &Schema, right: &Schema) -> Result<Schema> {
        if left.len() < self.key_count || right.len() < self.key_count {
            return Err(Error::invalid_argument(format!(
                "merge needs {} key columns on both sides",
                self.key_count
            )));
        }
        for (l, r) in left.columns()[..self.key_count]
            .iter()
            .zip(&right.columns()[..self.key_count])
        {
            if l != r {
                return Err(Error::invalid_argument(format!(
                    "merge key columns differ: {} vs {}",
                    l.name(),
                    r.name()
                )));
            }
        }

        // Every non-key column can be null after an outer join.
        let mut columns: Vec<Column> = Vec::with_capacity(left.len() + right.len());
        columns.extend(left.columns()[..self.key_count].iter().cloned());
        columns.extend(
            left.columns()[self.key_count..]
                .iter()
                .chain(&right.columns()[self.key_count..])
                .map(|c| c.clone().nullable(true)),
        );
        Schema::new(columns)
    }
}
