//! Sidebar filters.

use crate::dataset::Dataset;
use crate::listing::{ACCOMMODATES, BEDS, PRICE, PROPERTY_TYPE, ROOM_TYPE};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashSet;
use log::debug;
use staystat_core::{Result, Row, Value};
use staystat_query::Statistic;

/// Limits for the filter controls, taken from the unfiltered dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterBounds {
    pub price_min: i64,
    /// Highest price, truncated to an integer.
    pub price_max: i64,
    pub beds_max: i64,
    pub accommodates_max: i64,
    /// Distinct property types in first-seen order.
    pub property_types: Vec<String>,
    /// Distinct room types in first-seen order.
    pub room_types: Vec<String>,
}

impl FilterBounds {
    /// Reads the control limits off the unfiltered `dataset`.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        Ok(Self {
            price_min: 0,
            price_max: column_max(dataset, PRICE)?,
            beds_max: column_max(dataset, BEDS)?,
            accommodates_max: column_max(dataset, ACCOMMODATES)?,
            property_types: distinct_labels(dataset, PROPERTY_TYPE)?,
            room_types: distinct_labels(dataset, ROOM_TYPE)?,
        })
    }
}

fn column_max(dataset: &Dataset, column: &str) -> Result<i64> {
    let max = Statistic::Max.reduce(dataset.table().column_values(column)?);
    Ok(max.as_number().map_or(0, |m| libm::trunc(m) as i64))
}

fn distinct_labels(dataset: &Dataset, column: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut labels = Vec::new();
    for value in dataset.table().column_values(column)? {
        if let Some(label) = value.as_str() {
            if seen.insert(label) {
                labels.push(label.to_string());
            }
        }
    }
    Ok(labels)
}

/// Listing filter built from the sidebar controls.
///
/// Each control has an "off" setting under which it keeps every row:
///
/// - the price range is applied only when its upper end is above 1, and
///   keeps prices within `[min, max]`;
/// - `min_accommodates` and `min_beds` are applied only when above 0;
/// - the type lists are applied only when non-empty.
///
/// An active control drops rows whose value for it is missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingFilter {
    price_range: Option<(f64, f64)>,
    min_accommodates: u32,
    min_beds: u32,
    property_types: Vec<String>,
    room_types: Vec<String>,
}

impl ListingFilter {
    /// Creates a filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps prices within `[min, max]`; off unless `max` is above 1.
    pub fn price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some((min, max));
        self
    }

    /// Keeps listings for at least `n` guests; 0 turns it off.
    pub fn min_accommodates(mut self, n: u32) -> Self {
        self.min_accommodates = n;
        self
    }

    /// Keeps listings with at least `n` beds; 0 turns it off.
    pub fn min_beds(mut self, n: u32) -> Self {
        self.min_beds = n;
        self
    }

    /// Keeps the listed property types; an empty list turns it off.
    pub fn property_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.property_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Keeps the listed room types; an empty list turns it off.
    pub fn room_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.room_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the listings passing every active control.
    pub fn apply(&self, dataset: &Dataset) -> Result<Dataset> {
        let table = dataset.table();
        let price = table.column_index(PRICE)?;
        let accommodates = table.column_index(ACCOMMODATES)?;
        let beds = table.column_index(BEDS)?;
        let property_type = table.column_index(PROPERTY_TYPE)?;
        let room_type = table.column_index(ROOM_TYPE)?;

        let price_range = self.price_range.filter(|&(_, max)| max > 1.0);

        let keep = |row: &Row| {
            let values = row.values();
            if let Some((min, max)) = price_range {
                match values[price].as_number() {
                    Some(p) if p >= min && p <= max => {}
                    _ => return false,
                }
            }
            at_least(&values[accommodates], self.min_accommodates)
                && at_least(&values[beds], self.min_beds)
                && one_of(&values[property_type], &self.property_types)
                && one_of(&values[room_type], &self.room_types)
        };

        let filtered = table.filter(keep);
        debug!("filter kept {} of {} listings", filtered.len(), table.len());
        Ok(Dataset::from_validated(filtered))
    }
}

fn at_least(value: &Value, min: u32) -> bool {
    min == 0 || value.as_number().is_some_and(|v| v >= f64::from(min))
}

fn one_of(value: &Value, allowed: &[String]) -> bool {
    allowed.is_empty()
        || value
            .as_str()
            .is_some_and(|s| allowed.iter().any(|a| a == s))
}
