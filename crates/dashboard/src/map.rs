//! Price map layer.

use crate::config::MapConfig;
use crate::dataset::Dataset;
use crate::listing::{LATITUDE, LONGITUDE, PRICE};
use alloc::vec::Vec;
use staystat_core::Result;
use staystat_query::Statistic;

/// One listing on the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub price: f64,
}

/// Initial camera position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Midpoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Hexagon layer data: where to centre the camera and what to plot.
#[derive(Clone, Debug, PartialEq)]
pub struct MapLayer {
    /// Mean position of all located listings; `None` when none is located.
    pub midpoint: Option<Midpoint>,
    /// Listings with a price and both coordinates.
    pub points: Vec<MapPoint>,
    pub config: MapConfig,
}

impl MapLayer {
    /// Collects the located listings of `dataset` and their midpoint.
    pub fn from_dataset(dataset: &Dataset, config: &MapConfig) -> Result<Self> {
        let table = dataset.table();
        let lat = table.column_index(LATITUDE)?;
        let lon = table.column_index(LONGITUDE)?;
        let price = table.column_index(PRICE)?;

        let mean = |column: &str| -> Result<Option<f64>> {
            Ok(Statistic::Mean
                .reduce(table.column_values(column)?)
                .as_number())
        };
        let midpoint = match (mean(LATITUDE)?, mean(LONGITUDE)?) {
            (Some(latitude), Some(longitude)) => Some(Midpoint {
                latitude,
                longitude,
            }),
            _ => None,
        };

        let points = table
            .rows()
            .iter()
            .filter_map(|row| {
                let values = row.values();
                Some(MapPoint {
                    longitude: values[lon].as_number()?,
                    latitude: values[lat].as_number()?,
                    price: values[price].as_number()?,
                })
            })
            .collect();

        Ok(Self {
            midpoint,
            points,
            config: config.clone(),
        })
    }
}
