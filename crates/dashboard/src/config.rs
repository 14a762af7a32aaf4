//! Dashboard configuration.

use staystat_core::{Error, Result};
use staystat_query::AggregateCache;

/// Settings for the map layer.
#[derive(Clone, Debug, PartialEq)]
pub struct MapConfig {
    /// Initial zoom level (default: 11)
    pub zoom: u8,
    /// Camera pitch in degrees (default: 50)
    pub pitch: u8,
    /// Hexagon radius in meters (default: 100)
    pub hex_radius: u32,
    /// Hexagon height multiplier (default: 4)
    pub elevation_scale: u32,
    /// Hexagon height range (default: 0..1000)
    pub elevation_range: (u32, u32),
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: 11,
            pitch: 50,
            hex_radius: 100,
            elevation_scale: 4,
            elevation_range: (0, 1000),
        }
    }
}

/// Settings for building a [`crate::DashboardView`].
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardConfig {
    /// Aggregation results kept per view build (default: 64)
    pub cache_capacity: usize,
    /// Number of price histogram bins (default: 50)
    pub histogram_bins: usize,
    /// Decimal places for chart values (default: 2)
    pub round_digits: u32,
    pub map: MapConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            cache_capacity: AggregateCache::DEFAULT_SIZE,
            histogram_bins: 50,
            round_digits: 2,
            map: MapConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Checks the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(Error::invalid_argument("cache_capacity must be positive"));
        }
        if self.histogram_bins == 0 {
            return Err(Error::invalid_argument("histogram_bins must be positive"));
        }
        let (low, high) = self.map.elevation_range;
        if low > high {
            return Err(Error::invalid_argument("elevation_range is reversed"));
        }
        Ok(())
    }
}
