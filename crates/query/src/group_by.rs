//! Group-by aggregation over a single measure column.
//!
//! `aggregate` groups a table by one or more key columns and computes several
//! statistics over the one remaining column, returning them merged into one
//! wide table:
//!
//! ```rust
//! use staystat_core::schema::SchemaBuilder;
//! use staystat_core::{DataType, Row, Table, Value};
//! use staystat_query::aggregate;
//!
//! let schema = SchemaBuilder::new()
//!     .add_column("room_type", DataType::String).unwrap()
//!     .add_column("price", DataType::Int64).unwrap()
//!     .build().unwrap();
//! let table = Table::new(schema, vec![
//!     Row::new(vec!["Entire home".into(), Value::Int64(100)]),
//!     Row::new(vec!["Entire home".into(), Value::Int64(200)]),
//!     Row::new(vec!["Private room".into(), Value::Int64(50)]),
//! ]).unwrap();
//!
//! let result = aggregate(&table, &["room_type"], &["mean", "max", "min"]).unwrap();
//! assert_eq!(result.schema().column_names(), vec!["room_type", "mean", "max", "min"]);
//! assert_eq!(result.value(0, "mean"), Some(&Value::Float64(150.0)));
//! assert_eq!(result.value(1, "max"), Some(&Value::Int64(50)));
//! ```

use crate::executor::{GroupAggregator, OuterMerge, ProjectExecutor, SortExecutor};
use crate::statistic::Statistic;
use alloc::format;
use alloc::vec::Vec;
use log::debug;
use staystat_core::schema::{Column, Schema};
use staystat_core::{DataType, Error, Result, Table};

/// Groups `table` by `group_cols` and computes each named statistic over the
/// single remaining measure column.
///
/// See [`aggregate_with`] for the result shape and error conditions.
pub fn aggregate(table: &Table, group_cols: &[&str], stats: &[&str]) -> Result<Table> {
    if stats.is_empty() {
        return Err(Error::invalid_argument("statistics must not be empty"));
    }
    let stats = stats
        .iter()
        .map(|name| Statistic::parse(name))
        .collect::<Result<Vec<_>>>()?;
    aggregate_with(table, group_cols, &stats)
}

/// Groups `table` by `group_cols` and computes `stats` over the single
/// remaining measure column.
///
/// The result has the grouping columns followed by one column per distinct
/// statistic, in first-occurrence order, and one row per distinct grouping
/// key, sorted by key. A zero-row input yields a zero-row result with the same
/// columns.
///
/// Fails when `group_cols` or `stats` is empty, when `group_cols` repeats a
/// name, names a missing column or names a requested statistic, when the
/// table does not have exactly one non-key column, or when that column is not
/// numeric.
pub fn aggregate_with(table: &Table, group_cols: &[&str], stats: &[Statistic]) -> Result<Table> {
    let plan = AggregatePlan::resolve(table.schema(), group_cols, stats)?;

    if table.is_empty() {
        return Ok(Table::empty(plan.output_schema(table.schema())?));
    }

    debug!(
        "aggregating {} rows by {:?} over {} with {:?}",
        table.len(),
        group_cols,
        plan.measure_name(table.schema()),
        stats
    );

    let key_count = plan.group_by.len();
    let merge = OuterMerge::new(key_count);
    let mut result: Option<Table> = None;

    for &stat in stats {
        let partial = GroupAggregator::new(plan.group_by.clone(), plan.measure, stat).execute(table)?;
        result = Some(match result {
            None => partial,
            Some(acc) => {
                // A repeated statistic replaces the earlier column.
                let acc = if acc.schema().get_column_index(stat.name()).is_some() {
                    drop_column(&acc, stat.name())?
                } else {
                    acc
                };
                merge.execute(&acc, &partial)?
            }
        });
    }

    // `stats` is non-empty, so at least one partial table was produced.
    let merged = result.ok_or_else(|| Error::invalid_argument("statistics must not be empty"))?;

    let output = plan.output_schema(table.schema())?;
    let ordered = ProjectExecutor::by_names(&output.column_names()).execute(&merged)?;

    let key_indices: Vec<usize> = (0..key_count).collect();
    Ok(SortExecutor::ascending(&key_indices).execute(ordered))
}

/// Column indices resolved and validated for one aggregation call.
struct AggregatePlan {
    group_by: Vec<usize>,
    measure: usize,
    stats: Vec<Statistic>,
}

impl AggregatePlan {
    fn resolve(schema: &Schema, group_cols: &[&str], stats: &[Statistic]) -> Result<Self> {
        if group_cols.is_empty() {
            return Err(Error::invalid_argument("group columns must not be empty"));
        }
        if stats.is_empty() {
            return Err(Error::invalid_argument("statistics must not be empty"));
        }
        check_group_cols(group_cols)?;
        if let Some(stat) = stats.iter().find(|s| group_cols.contains(&s.name())) {
            return Err(Error::invalid_argument(format!(
                "group column {} clashes with a statistic column",
                stat.name()
            )));
        }

        let group_by = group_cols
            .iter()
            .map(|name| schema.index_of(name))
            .collect::<Result<Vec<usize>>>()?;

        let measures: Vec<usize> = (0..schema.len()).filter(|i| !group_by.contains(i)).collect();
        let measure = match measures.as_slice() {
            [single] => *single,
            _ => {
                return Err(Error::invalid_argument(format!(
                    "expected exactly one measure column besides {:?}, found {}",
                    group_cols,
                    measures.len()
                )))
            }
        };

        let measure_column = &schema.columns()[measure];
        if !measure_column.data_type().is_numeric() {
            return Err(Error::type_mismatch(
                measure_column.name(),
                "numeric",
                measure_column.data_type(),
            ));
        }

        let mut distinct: Vec<Statistic> = Vec::with_capacity(stats.len());
        for stat in stats {
            if !distinct.contains(stat) {
                distinct.push(*stat);
            }
        }

        Ok(Self {
            group_by,
            measure,
            stats: distinct,
        })
    }

    fn measure_name<'a>(&self, schema: &'a Schema) -> &'a str {
        schema.columns()[self.measure].name()
    }

    fn measure_type(&self, schema: &Schema) -> DataType {
        schema.columns()[self.measure].data_type()
    }

    /// Grouping columns followed by one nullable column per distinct statistic.
    fn output_schema(&self, input: &Schema) -> Result<Schema> {
        let measure_type = self.measure_type(input);
        let mut columns: Vec<Column> = self
            .group_by
            .iter()
            .map(|&idx| input.columns()[idx].clone())
            .collect();
        columns.extend(
            self.stats
                .iter()
                .map(|s| Column::new(s.name(), s.output_type(measure_type)).nullable(true)),
        );
        Schema::new(columns)
    }
}

/// Rejects a group column listed more than once.
pub(crate) fn check_group_cols(group_cols: &[&str]) -> Result<()> {
    for (i, name) in group_cols.iter().enumerate() {
        if group_cols[..i].contains(name) {
            return Err(Error::invalid_argument(format!(
                "group column listed twice: {}",
                name
            )));
        }
    }
    Ok(())
}

fn drop_column(table: &Table, name: &str) -> Result<Table> {
    let keep: Vec<&str> = table
        .schema()
        .column_names()
        .into_iter()
        .filter(|c| *c != name)
        .collect();
    ProjectExecutor::by_names(&keep).execute(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use staystat_core::schema::SchemaBuilder;
    use staystat_core::{Row, Value};

    fn rooms() -> Table {
        let schema = SchemaBuilder::new()
            .add_column("room_type", DataType::String)
            .unwrap()
            .add_column("price", DataType::Int64)
            .unwrap()
            .build()
            .unwrap();
        Table::new(
            schema,
            vec![
                Row::new(vec![Value::from("Entire home"), Value::Int64(100)]),
                Row::new(vec![Value::from("Entire home"), Value::Int64(200)]),
                Row::new(vec![Value::from("Private room"), Value::Int64(50)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_mean_max_min_by_room_type() {
        let result = aggregate(&rooms(), &["room_type"], &["mean", "max", "min"]).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(
            result.schema().column_names(),
            vec!["room_type", "mean", "max", "min"]
        );
        assert_eq!(
            result.rows()[0].values(),
            &[
                Value::from("Entire home"),
                Value::Float64(150.0),
                Value::Int64(200),
                Value::Int64(100)
            ]
        );
        assert_eq!(
            result.rows()[1].values(),
            &[
                Value::from("Private room"),
                Value::Float64(50.0),
                Value::Int64(50),
                Value::Int64(50)
            ]
        );
    }

    #[test]
    fn test_duplicate_stats_single_column() {
        let result = aggregate(&rooms(), &["room_type"], &["max", "mean", "max"]).unwrap();
        assert_eq!(result.schema().column_names(), vec!["room_type", "max", "mean"]);
        assert_eq!(result.value(0, "max"), Some(&Value::Int64(200)));
    }

    #[test]
    fn test_unsupported_statistic() {
        let err = aggregate(&rooms(), &["room_type"], &["median"]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedStatistic { .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_empty_group_cols() {
        let err = aggregate(&rooms(), &[], &["mean"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_empty_stats() {
        let err = aggregate(&rooms(), &["room_type"], &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_missing_group_column() {
        let err = aggregate(&rooms(), &["neighbourhood"], &["mean"]).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { .. }));
    }

    #[test]
    fn test_repeated_group_column() {
        let err = aggregate(&rooms(), &["room_type", "room_type"], &["mean"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_non_numeric_measure() {
        let err = aggregate(&rooms(), &["price"], &["mean"]).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_requires_single_measure() {
        let schema = SchemaBuilder::new()
            .add_column("room_type", DataType::String)
            .unwrap()
            .add_column("price", DataType::Int64)
            .unwrap()
            .add_column("beds", DataType::Int64)
            .unwrap()
            .build()
            .unwrap();
        let table = Table::empty(schema);
        let err = aggregate(&table, &["room_type"], &["mean"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));

        // Every column used as a key leaves no measure.
        let err = aggregate(&rooms(), &["room_type", "price"], &["mean"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::empty(rooms().schema().clone());
        let result = aggregate(&table, &["room_type"], &["mean", "min"]).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.schema().column_names(), vec!["room_type", "mean", "min"]);
        assert_eq!(
            result.schema().get_column("min").unwrap().data_type(),
            DataType::Int64
        );
    }

    #[test]
    fn test_empty_table_still_validates() {
        let table = Table::empty(rooms().schema().clone());
        assert!(aggregate(&table, &["room_type"], &["median"]).is_err());
        assert!(aggregate(&table, &[], &["mean"]).is_err());
    }

    #[test]
    fn test_key_named_like_statistic() {
        let schema = SchemaBuilder::new()
            .add_column("max", DataType::String)
            .unwrap()
            .add_column("price", DataType::Int64)
            .unwrap()
            .build()
            .unwrap();
        let table = Table::new(schema, vec![Row::new(vec!["x".into(), Value::Int64(1)])]).unwrap();
        let err = aggregate(&table, &["max"], &["max"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(err.is_invalid_input());

        // Other statistics can still be computed under that key.
        let result = aggregate(&table, &["max"], &["mean", "min"]).unwrap();
        assert_eq!(result.schema().column_names(), vec!["max", "mean", "min"]);
    }
}
