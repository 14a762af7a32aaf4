//! Headline price figures.

use crate::dataset::Dataset;
use crate::listing::PRICE;
use staystat_core::Result;
use staystat_query::Statistic;

/// Mean, lowest and highest price over a dataset, plus its size.
///
/// The price figures are `None` only for an empty dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSummary {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub units: usize,
}

impl PriceSummary {
    /// Computes the headline price figures over every listing in `dataset`.
    pub fn compute(dataset: &Dataset) -> Result<Self> {
        let table = dataset.table();
        let figure = |stat: Statistic| -> Result<Option<f64>> {
            Ok(stat.reduce(table.column_values(PRICE)?).as_number())
        };
        Ok(Self {
            mean: figure(Statistic::Mean)?,
            min: figure(Statistic::Min)?,
            max: figure(Statistic::Max)?,
            units: dataset.len(),
        })
    }
}
