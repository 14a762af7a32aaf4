//! Validated listings snapshot.

use crate::listing::{self, ACCOMMODATES, BEDS, PRICE, PRICE_PER_BED, PRICE_PER_PERSON};
use alloc::sync::Arc;
use alloc::vec::Vec;
use log::{debug, warn};
use staystat_core::schema::{Column, Schema};
use staystat_core::{DataType, Error, Result, Row, Table, Value};

/// Rounds `value` to `digits` decimal places, halves away from zero.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = libm::pow(10.0, digits as f64);
    libm::round(value * factor) / factor
}

/// An immutable listings table with a numeric, non-missing `price` on every row.
///
/// Cloning is cheap: the table is shared.
#[derive(Clone, Debug)]
pub struct Dataset {
    table: Arc<Table>,
}

impl Dataset {
    /// Validates a raw listings table.
    ///
    /// Every column in [`listing::REQUIRED`] must exist. A `String` price
    /// column is parsed with [`listing::parse_price`] and integer prices are
    /// widened, so `price` is always `Float64` afterwards. Rows whose price
    /// is null, unparseable or NaN are dropped.
    pub fn new(table: Table) -> Result<Self> {
        for name in listing::REQUIRED {
            table.column_index(name)?;
        }
        let price_idx = table.column_index(PRICE)?;
        let table = normalize_price(table, price_idx)?;

        let total = table.len();
        let table = table.filter(|row| !row.values()[price_idx].is_missing());
        if table.len() < total {
            debug!("dropped {} listings without a price", total - table.len());
        }

        Ok(Self {
            table: Arc::new(table),
        })
    }

    /// Wraps a table that already went through [`Dataset::new`].
    pub(crate) fn from_validated(table: Table) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Returns the underlying table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns a shared handle to the underlying table.
    pub fn shared(&self) -> Arc<Table> {
        Arc::clone(&self.table)
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no listing is left.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterates over the present numeric values of a column.
    pub fn numbers(&self, column: &str) -> Result<impl Iterator<Item = f64> + '_> {
        Ok(self.table.column_values(column)?.filter_map(Value::as_number))
    }

    /// Appends `price_per_bed` and `price_per_person`.
    ///
    /// Both are rounded to two decimals. A zero or missing divisor yields
    /// `Null`. Columns already present are kept as they are, so calling this
    /// twice returns the dataset unchanged.
    pub fn with_derived_columns(&self) -> Result<Dataset> {
        let price = self.table.column_index(PRICE)?;
        let mut table: Option<Table> = None;

        for (name, divisor) in [(PRICE_PER_BED, BEDS), (PRICE_PER_PERSON, ACCOMMODATES)] {
            let current: &Table = table.as_ref().unwrap_or(&*self.table);
            if current.schema().get_column_index(name).is_some() {
                continue;
            }
            let ratios = self.ratios(price, self.table.column_index(divisor)?);
            let column = Column::new(name, DataType::Float64).nullable(true);
            table = Some(current.with_column(column, ratios)?);
        }

        Ok(table.map_or_else(|| self.clone(), Self::from_validated))
    }

    fn ratios(&self, numerator: usize, denominator: usize) -> Vec<Value> {
        self.table
            .rows()
            .iter()
            .map(|row| {
                let n = row.values()[numerator].as_number();
                let d = row.values()[denominator].as_number();
                match (n, d) {
                    (Some(n), Some(d)) if d != 0.0 => Value::Float64(round_to(n / d, 2)),
                    _ => Value::Null,
                }
            })
            .collect()
    }
}

/// Rewrites the price column as nullable `Float64`.
fn normalize_price(table: Table, price_idx: usize) -> Result<Table> {
    let price_column = &table.schema().columns()[price_idx];
    let data_type = price_column.data_type();
    match data_type {
        DataType::Float64 => return Ok(table),
        DataType::Int32 | DataType::Int64 | DataType::String => {}
        DataType::Boolean => return Err(Error::type_mismatch(PRICE, "numeric or string", data_type)),
    }

    let (schema, rows) = table.into_parts();
    let columns: Vec<Column> = schema
        .columns()
        .iter()
        .map(|c| {
            if c.name() == PRICE {
                Column::new(PRICE, DataType::Float64).nullable(true)
            } else {
                c.clone()
            }
        })
        .collect();
    let schema = Schema::new(columns)?;

    let mut unparsed = 0usize;
    let rows = rows
        .into_iter()
        .map(|row| {
            let mut values = row.into_values();
            let price = match &values[price_idx] {
                Value::String(raw) => match listing::parse_price(raw) {
                    Some(price) => Value::Float64(price),
                    None => {
                        unparsed += 1;
                        Value::Null
                    }
                },
                other => other.as_number().map_or(Value::Null, Value::Float64),
            };
            values[price_idx] = price;
            Row::new(values)
        })
        .collect();

    if unparsed > 0 {
        warn!("{} listing prices could not be parsed", unparsed);
    }
    Table::new(schema, rows)
}
