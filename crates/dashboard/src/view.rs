//! Dashboard view model.
//!
//! [`DashboardView::build`] computes every chart of the dashboard from one
//! filtered [`Dataset`]. Category charts share an [`AggregateCache`] so each
//! grouping of the snapshot is aggregated once, however many bar series are
//! cut from it.

use crate::config::DashboardConfig;
use crate::dataset::{round_to, Dataset};
use crate::histogram::Histogram;
use crate::listing::{self, NEIGHBOURHOOD, PRICE, PRICE_PER_BED, PRICE_PER_PERSON, PROPERTY_TYPE, ROOM_TYPE};
use crate::map::MapLayer;
use crate::summary::PriceSummary;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use log::debug;
use staystat_core::{Result, Table};
use staystat_query::executor::{ProjectExecutor, SortExecutor, SortOrder};
use staystat_query::AggregateCache;

/// Labelled values for one bar chart, in display order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BarSeries {
    pub labels: Vec<String>,
    /// Rounded values; `None` where the group had no value.
    pub values: Vec<Option<f64>>,
}

impl BarSeries {
    /// Reads `label_col` and `value_col` off `table`, row by row.
    ///
    /// Rows with a null label are skipped.
    fn from_table(table: &Table, label_col: &str, value_col: &str, digits: u32) -> Result<Self> {
        let labels = table.column_index(label_col)?;
        let values = table.column_index(value_col)?;
        let mut series = Self::default();
        for row in table.rows() {
            let label = &row.values()[labels];
            if label.is_null() {
                continue;
            }
            series.labels.push(label.to_string());
            series
                .values
                .push(row.values()[values].as_number().map(|v| round_to(v, digits)));
        }
        Ok(series)
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the chart has no bar.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Price charts for one category column (room type or property type).
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryPrices {
    /// Category column followed by `mean`, `max`, `min` of price.
    pub prices: Arc<Table>,
    pub by_max: BarSeries,
    pub by_min: BarSeries,
    pub by_mean: BarSeries,
    /// Mean price per bed, ascending.
    pub mean_per_bed: BarSeries,
    /// Mean price per accommodated person, ascending.
    pub mean_per_person: BarSeries,
}

impl CategoryPrices {
    fn build(cache: &mut AggregateCache, category: &str, digits: u32) -> Result<Self> {
        let prices = cache.get_or_compute(&[category], PRICE, &["mean", "max", "min"])?;
        let sorted = |stat: &str| -> Result<BarSeries> {
            let table = sort_by(&prices, stat, SortOrder::Asc)?;
            BarSeries::from_table(&table, category, stat, digits)
        };
        let by_max = sorted("max")?;
        let by_min = sorted("min")?;
        let by_mean = sorted("mean")?;

        let mut mean_of = |measure: &str| -> Result<BarSeries> {
            let means = cache.get_or_compute(&[category], measure, &["mean"])?;
            let table = sort_by(&means, "mean", SortOrder::Asc)?;
            BarSeries::from_table(&table, category, "mean", digits)
        };
        let mean_per_bed = mean_of(PRICE_PER_BED)?;
        let mean_per_person = mean_of(PRICE_PER_PERSON)?;

        Ok(Self {
            prices,
            by_max,
            by_min,
            by_mean,
            mean_per_bed,
            mean_per_person,
        })
    }
}

/// Everything the dashboard shows for a non-empty selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub summary: PriceSummary,
    pub by_room_type: CategoryPrices,
    pub by_property_type: CategoryPrices,
    /// Mean price per neighbourhood, highest first.
    pub neighbourhood_prices: BarSeries,
    pub histogram: Histogram,
    pub map: MapLayer,
    /// The selected listings, restricted to the display columns present.
    pub listings: Table,
}

/// The dashboard for one selection of listings.
#[derive(Clone, Debug, PartialEq)]
pub enum DashboardView {
    /// The filters left no listing.
    NoData,
    Ready(Report),
}

impl DashboardView {
    /// Builds every chart for `dataset`.
    ///
    /// Derived price columns are added when missing.
    pub fn build(dataset: &Dataset, config: &DashboardConfig) -> Result<Self> {
        config.validate()?;
        if dataset.is_empty() {
            debug!("no listings left to show");
            return Ok(DashboardView::NoData);
        }
        debug!("building dashboard over {} listings", dataset.len());

        let dataset = dataset.with_derived_columns()?;
        let digits = config.round_digits;
        let mut cache = AggregateCache::new(dataset.shared(), config.cache_capacity);

        let summary = PriceSummary::compute(&dataset)?;
        let by_room_type = CategoryPrices::build(&mut cache, ROOM_TYPE, digits)?;
        let by_property_type = CategoryPrices::build(&mut cache, PROPERTY_TYPE, digits)?;
        let neighbourhood_prices = neighbourhood_prices(&mut cache, digits)?;
        let histogram = Histogram::compute(dataset.numbers(PRICE)?, config.histogram_bins)?;
        let map = MapLayer::from_dataset(&dataset, &config.map)?;
        let listings = display_table(dataset.table())?;

        debug!(
            "dashboard aggregates: {} computed, {} reused",
            cache.misses(),
            cache.hits()
        );

        Ok(DashboardView::Ready(Report {
            summary,
            by_room_type,
            by_property_type,
            neighbourhood_prices,
            histogram,
            map,
            listings,
        }))
    }

    /// Returns the report, or `None` for [`DashboardView::NoData`].
    pub fn report(&self) -> Option<&Report> {
        match self {
            DashboardView::NoData => None,
            DashboardView::Ready(report) => Some(report),
        }
    }

    /// Returns true for [`DashboardView::NoData`].
    pub fn is_empty(&self) -> bool {
        matches!(self, DashboardView::NoData)
    }
}

/// Mean price per neighbourhood, groups without a mean dropped, highest first.
fn neighbourhood_prices(cache: &mut AggregateCache, digits: u32) -> Result<BarSeries> {
    let means = cache.get_or_compute(&[NEIGHBOURHOOD], PRICE, &["mean"])?;
    let mean = means.column_index("mean")?;
    let priced = means.filter(|row| !row.values()[mean].is_missing());
    let sorted = SortExecutor::new(vec![(mean, SortOrder::Desc)]).execute(priced);
    BarSeries::from_table(&sorted, NEIGHBOURHOOD, "mean", digits)
}

fn sort_by(table: &Table, column: &str, order: SortOrder) -> Result<Table> {
    let idx = table.column_index(column)?;
    Ok(SortExecutor::new(vec![(idx, order)]).execute(table.clone()))
}

fn display_table(table: &Table) -> Result<Table> {
    let columns: Vec<&str> = listing::DISPLAY
        .iter()
        .copied()
        .filter(|c| table.schema().get_column_index(c).is_some())
        .collect();
    ProjectExecutor::by_names(&columns).execute(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ListingFilter;
    use staystat_core::schema::SchemaBuilder;
    use staystat_core::{DataType, Row, Value};

    fn dataset() -> Dataset {
        let mut builder = SchemaBuilder::new();
        for name in listing::REQUIRED {
            let data_type = match name {
                "price" | "latitude" | "longitude" => DataType::Float64,
                "beds" | "accommodates" => DataType::Int64,
                _ => DataType::String,
            };
            builder = builder.add_column(name, data_type).unwrap();
        }
        let schema = builder
            .add_column("name", DataType::String)
            .unwrap()
            .add_nullable(&["neighbourhood"])
            .build()
            .unwrap();

        let row = |price: f64, beds: i64, acc: i64, prop: &str, room: &str, hood: Option<&str>| {
            Row::new(vec![
                Value::Float64(price),
                Value::Int64(beds),
                Value::Int64(acc),
                prop.into(),
                room.into(),
                Value::from(hood),
                Value::Float64(41.39),
                Value::Float64(2.16),
                "Sunny flat".into(),
            ])
        };
        let rows = vec![
            row(100.0, 2, 4, "Entire rental unit", "Entire home", Some("Gracia")),
            row(200.0, 1, 2, "Entire rental unit", "Entire home", Some("Sants")),
            row(50.0, 1, 1, "Private room in rental unit", "Private room", Some("Gracia")),
            row(70.0, 3, 3, "Room in hotel", "Hotel room", None),
        ];
        Dataset::new(Table::new(schema, rows).unwrap()).unwrap()
    }

    fn ready(dataset: &Dataset) -> Report {
        match DashboardView::build(dataset, &DashboardConfig::default()).unwrap() {
            DashboardView::Ready(report) => report,
            DashboardView::NoData => panic!("expected a report"),
        }
    }

    #[test]
    fn test_no_data() {
        let empty = ListingFilter::new()
            .room_types(["Shared room"])
            .apply(&dataset())
            .unwrap();
        let view = DashboardView::build(&empty, &DashboardConfig::default()).unwrap();
        assert!(view.is_empty());
        assert!(view.report().is_none());
    }

    #[test]
    fn test_room_type_bars() {
        let report = ready(&dataset());
        let rooms = &report.by_room_type;

        assert_eq!(rooms.prices.len(), 3);
        assert_eq!(rooms.by_max.labels, vec!["Private room", "Hotel room", "Entire home"]);
        assert_eq!(rooms.by_max.values, vec![Some(50.0), Some(70.0), Some(200.0)]);
        assert_eq!(rooms.by_min.labels, vec!["Private room", "Hotel room", "Entire home"]);
        assert_eq!(rooms.by_mean.values, vec![Some(50.0), Some(70.0), Some(150.0)]);
    }

    #[test]
    fn test_per_unit_means() {
        let report = ready(&dataset());
        let rooms = &report.by_room_type;

        // Entire home: 100/2 and 200/1 per bed.
        assert_eq!(rooms.mean_per_bed.labels, vec!["Hotel room", "Private room", "Entire home"]);
        assert_eq!(rooms.mean_per_bed.values, vec![Some(23.33), Some(50.0), Some(125.0)]);
        assert_eq!(
            rooms.mean_per_person.values.last(),
            Some(&Some(62.5))
        );
    }

    #[test]
    fn test_neighbourhood_ranking() {
        let report = ready(&dataset());
        assert_eq!(report.neighbourhood_prices.labels, vec!["Sants", "Gracia"]);
        assert_eq!(
            report.neighbourhood_prices.values,
            vec![Some(200.0), Some(75.0)]
        );
    }

    #[test]
    fn test_summary_histogram_map_table() {
        let report = ready(&dataset());
        assert_eq!(report.summary.units, 4);
        assert_eq!(report.summary.max, Some(200.0));
        assert_eq!(report.histogram.total(), 4);
        assert_eq!(report.map.points.len(), 4);
        assert_eq!(
            report.listings.schema().column_names(),
            vec!["name", "price", "neighbourhood", "property_type", "room_type", "beds"]
        );
    }

    #[test]
    fn test_invalid_config() {
        let config = DashboardConfig {
            histogram_bins: 0,
            ..DashboardConfig::default()
        };
        assert!(DashboardView::build(&dataset(), &config).is_err());
    }
}
