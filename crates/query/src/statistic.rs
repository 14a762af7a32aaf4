//! Aggregate statistics over a measure column.

use core::fmt;
use core::str::FromStr;
use staystat_core::{DataType, Error, Result, Value};

/// A reduction applied to the measure values of one group.
///
/// Every statistic ignores missing values (`Null` and NaN) and yields `Null`
/// when a group has no values left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Statistic {
    /// Arithmetic mean, always `Float64`.
    Mean,
    /// Smallest value, keeping the measure type.
    Min,
    /// Largest value, keeping the measure type.
    Max,
}

impl Statistic {
    /// All supported statistics.
    pub const ALL: [Statistic; 3] = [Statistic::Mean, Statistic::Min, Statistic::Max];

    /// Returns the statistic name, which is also its output column name.
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Min => "min",
            Statistic::Max => "max",
        }
    }

    /// Parses a statistic name.
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::unsupported_statistic(name))
    }

    /// Returns the output column type for a measure of type `measure`.
    pub fn output_type(&self, measure: DataType) -> DataType {
        match self {
            Statistic::Mean => DataType::Float64,
            Statistic::Min | Statistic::Max => measure,
        }
    }

    /// Reduces a sequence of measure values.
    pub fn reduce<'a, I>(&self, values: I) -> Value
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let present = values.into_iter().filter(|v| !v.is_missing());
        match self {
            Statistic::Mean => {
                let (sum, count) = present
                    .filter_map(Value::as_number)
                    .fold((0.0f64, 0usize), |(sum, count), v| (sum + v, count + 1));
                if count == 0 {
                    Value::Null
                } else {
                    Value::Float64(sum / count as f64)
                }
            }
            Statistic::Min => present.min().cloned().unwrap_or(Value::Null),
            Statistic::Max => present.max().cloned().unwrap_or(Value::Null),
        }
    }
}

impl FromStr for Statistic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
