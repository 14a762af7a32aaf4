//! Sort executor.

use alloc::vec::Vec;
use core::cmp::Ordering;
use staystat_core::{Row, Table, Value};

/// Sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Sort executor - stably sorts rows by the given columns.
///
/// Null values are placed last regardless of direction.
pub struct SortExecutor {
    /// Column indices and sort orders.
    order_by: Vec<(usize, SortOrder)>,
}

impl SortExecutor {
    /// Creates a new sort executor.
    pub fn new(order_by: Vec<(usize, SortOrder)>) -> Self {
        Self { order_by }
    }

    /// Sorts ascending on the given columns, in priority order.
    pub fn ascending(columns: &[usize]) -> Self {
        Self::new(columns.iter().map(|&c| (c, SortOrder::Asc)).collect())
    }

    /// Executes the sort on the input table.
    pub fn execute(&self, input: Table) -> Table {
        let (schema, mut rows) = input.into_parts();
        rows.sort_by(|a, b| self.compare_rows(a, b));
        Table::from_parts(schema, rows)
    }

    fn compare_rows(&self, a: &Row, b: &Row) -> Ordering {
        for (col_idx, order) in &self.order_by {
            let cmp = match (a.get(*col_idx), b.get(*col_idx)) {
                (Some(av), Some(bv)) => compare_nulls_last(av, bv, *order),
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };

            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    }
}

fn compare_nulls_last(a: &Value, b: &Value, order: SortOrder) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match order {
            SortOrder::Asc => a.cmp(b),
            SortOrder::Desc => a.cmp(b).reverse(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use staystat_core::schema::SchemaBuilder;
    use staystat_core::DataType;

    fn prices(values: Vec<(&str, Option<f64>)>) -> Table {
        let schema = SchemaBuilder::new()
            .add_column("room_type", DataType::String)
            .unwrap()
            .add_column("max", DataType::Float64)
            .unwrap()
            .add_nullable(&["max"])
            .build()
            .unwrap();
        let rows = values
            .into_iter()
            .map(|(k, v)| Row::new(vec![Value::from(k), Value::from(v)]))
            .collect();
        Table::new(schema, rows).unwrap()
    }

    fn labels(table: &Table) -> Vec<&str> {
        table
            .column_values("room_type")
            .unwrap()
            .filter_map(Value::as_str)
            .collect()
    }

    #[test]
    fn test_sort_executor_asc() {
        let table = prices(vec![("a", Some(30.0)), ("b", Some(10.0)), ("c", Some(20.0))]);
        let sorted = SortExecutor::new(vec![(1, SortOrder::Asc)]).execute(table);
        assert_eq!(labels(&sorted), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_executor_desc() {
        let table = prices(vec![("a", Some(30.0)), ("b", Some(10.0)), ("c", Some(20.0))]);
        let sorted = SortExecutor::new(vec![(1, SortOrder::Desc)]).execute(table);
        assert_eq!(labels(&sorted), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_nulls_last() {
        let table = prices(vec![("a", None), ("b", Some(10.0)), ("c", Some(f64::NAN))]);
        let asc = SortExecutor::new(vec![(1, SortOrder::Asc)]).execute(table.clone());
        assert_eq!(labels(&asc), vec!["b", "a", "c"]);
        let desc = SortExecutor::new(vec![(1, SortOrder::Desc)]).execute(table);
        assert_eq!(labels(&desc), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let table = prices(vec![("b", Some(1.0)), ("a", Some(1.0)), ("c", Some(0.0))]);
        let sorted = SortExecutor::ascending(&[1]).execute(table);
        assert_eq!(labels(&sorted), vec!["c", "b", "a"]);
    }
}
