//! Integration tests for group aggregation over listing-shaped tables.

use std::sync::Arc;

use staystat_core::schema::SchemaBuilder;
use staystat_core::{DataType, Error, Row, Table, Value};
use staystat_query::executor::{SortExecutor, SortOrder};
use staystat_query::{aggregate, aggregate_with, AggregateCache, Statistic};

fn room_prices(rows: &[(&str, i64)]) -> Table {
    let schema = SchemaBuilder::new()
        .add_column("room_type", DataType::String)
        .unwrap()
        .add_column("price", DataType::Int64)
        .unwrap()
        .build()
        .unwrap();
    Table::new(
        schema,
        rows.iter()
            .map(|&(room, price)| Row::new(vec![Value::from(room), Value::Int64(price)]))
            .collect(),
    )
    .unwrap()
}

fn listings() -> Table {
    let schema = SchemaBuilder::new()
        .add_column("property_type", DataType::String)
        .unwrap()
        .add_column("room_type", DataType::String)
        .unwrap()
        .add_column("neighbourhood", DataType::String)
        .unwrap()
        .add_column("price", DataType::Float64)
        .unwrap()
        .add_column("beds", DataType::Int64)
        .unwrap()
        .add_nullable(&["neighbourhood", "price", "beds"])
        .build()
        .unwrap();

    let rows: Vec<(&str, &str, Option<&str>, Option<f64>, Option<i64>)> = vec![
        ("Entire rental unit", "Entire home", Some("Gracia"), Some(120.0), Some(2)),
        ("Entire rental unit", "Entire home", Some("Gracia"), Some(180.0), Some(3)),
        ("Private room in rental unit", "Private room", Some("El Raval"), Some(45.0), Some(1)),
        ("Private room in rental unit", "Private room", None, Some(55.0), Some(1)),
        ("Room in hotel", "Hotel room", Some("El Raval"), None, Some(1)),
        ("Entire loft", "Entire home", Some("Sants"), Some(95.0), None),
    ];
    Table::new(
        schema,
        rows.into_iter()
            .map(|(prop, room, hood, price, beds)| {
                Row::new(vec![
                    Value::from(prop),
                    Value::from(room),
                    Value::from(hood),
                    Value::from(price),
                    Value::from(beds),
                ])
            })
            .collect(),
    )
    .unwrap()
}

fn project(table: &Table, columns: &[&str]) -> Table {
    staystat_query::executor::ProjectExecutor::by_names(columns)
        .execute(table)
        .unwrap()
}

#[test]
fn test_room_type_example() {
    let table = room_prices(&[("Entire home", 100), ("Entire home", 200), ("Private room", 50)]);
    let result = aggregate(&table, &["room_type"], &["mean", "max", "min"]).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.value(0, "room_type"), Some(&Value::from("Entire home")));
    assert_eq!(result.value(0, "mean"), Some(&Value::Float64(150.0)));
    assert_eq!(result.value(0, "max"), Some(&Value::Int64(200)));
    assert_eq!(result.value(0, "min"), Some(&Value::Int64(100)));
    assert_eq!(result.value(1, "room_type"), Some(&Value::from("Private room")));
    assert_eq!(result.value(1, "mean"), Some(&Value::Float64(50.0)));
    assert_eq!(result.value(1, "max"), Some(&Value::Int64(50)));
    assert_eq!(result.value(1, "min"), Some(&Value::Int64(50)));
}

#[test]
fn test_error_examples() {
    let table = room_prices(&[("Entire home", 100)]);
    assert!(matches!(
        aggregate(&table, &["room_type"], &["median"]),
        Err(Error::UnsupportedStatistic { .. })
    ));
    assert!(matches!(
        aggregate(&table, &[], &["mean"]),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_empty_table_keeps_columns() {
    let table = room_prices(&[]);
    let result = aggregate(&table, &["room_type"], &["mean", "max", "min"]).unwrap();
    assert!(result.is_empty());
    assert_eq!(
        result.schema().column_names(),
        vec!["room_type", "mean", "max", "min"]
    );
}

#[test]
fn test_group_without_prices_yields_null() {
    let table = project(&listings(), &["room_type", "price"]);
    let result = aggregate(&table, &["room_type"], &["mean", "min", "max"]).unwrap();

    let hotel = result
        .rows()
        .iter()
        .find(|r| r.values()[0] == Value::from("Hotel room"))
        .unwrap();
    assert!(hotel.values()[1..].iter().all(Value::is_null));
}

#[test]
fn test_null_key_is_its_own_group() {
    let table = project(&listings(), &["neighbourhood", "price"]);
    let result = aggregate(&table, &["neighbourhood"], &["mean"]).unwrap();

    assert_eq!(result.len(), 4);
    // Null keys sort last.
    assert_eq!(result.value(3, "neighbourhood"), Some(&Value::Null));
    assert_eq!(result.value(3, "mean"), Some(&Value::Float64(55.0)));
}

#[test]
fn test_two_key_columns() {
    let table = project(&listings(), &["property_type", "room_type", "price"]);
    let result = aggregate(&table, &["property_type", "room_type"], &["max"]).unwrap();

    assert_eq!(result.column_count(), 3);
    assert_eq!(result.len(), 4);
    assert_eq!(
        result.rows()[0].values(),
        &[
            Value::from("Entire loft"),
            Value::from("Entire home"),
            Value::Float64(95.0)
        ]
    );
}

#[test]
fn test_integer_measure_with_nulls() {
    let table = project(&listings(), &["room_type", "beds"]);
    let result = aggregate_with(&table, &["room_type"], &[Statistic::Mean, Statistic::Max]).unwrap();
    let entire = &result.rows()[0];
    assert_eq!(entire.values()[0], Value::from("Entire home"));
    assert_eq!(entire.values()[1], Value::Float64(2.5));
    assert_eq!(entire.values()[2], Value::Int64(3));
}

#[test]
fn test_sorting_aggregated_bars() {
    let table = project(&listings(), &["room_type", "price"]);
    let result = aggregate(&table, &["room_type"], &["mean", "max", "min"]).unwrap();
    let max_idx = result.column_index("max").unwrap();

    let by_max = SortExecutor::new(vec![(max_idx, SortOrder::Asc)]).execute(result);
    let labels: Vec<_> = by_max
        .column_values("room_type")
        .unwrap()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(labels, vec!["Private room", "Entire home", "Hotel room"]);
}

#[test]
fn test_cache_reuses_result_across_sections() {
    let mut cache = AggregateCache::with_defaults(Arc::new(listings()));

    for _ in 0..3 {
        let stats = cache
            .get_or_compute(&["room_type"], "price", &["mean", "max", "min"])
            .unwrap();
        assert_eq!(stats.len(), 3);
    }
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 2);
}
