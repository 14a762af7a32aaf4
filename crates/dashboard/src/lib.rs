//! staystat Dashboard - View model for the listings price dashboard.
//!
//! This crate turns a raw listings table into everything the dashboard
//! renders, without doing any rendering itself:
//!
//! - `Dataset`: Validated listings with nullable prices dropped
//! - `ListingFilter` / `FilterBounds`: Sidebar filters and their limits
//! - `PriceSummary`: Headline price figures
//! - `DashboardView`: Per-category bar series, neighbourhood ranking,
//!   price histogram and map layer
//!
//! # Example
//!
//! ```rust
//! use staystat_core::schema::SchemaBuilder;
//! use staystat_core::{DataType, Row, Table, Value};
//! use staystat_dashboard::{DashboardConfig, DashboardView, Dataset, ListingFilter};
//!
//! let mut builder = SchemaBuilder::new();
//! for (name, dt) in [
//!     ("price", DataType::Float64),
//!     ("beds", DataType::Int64),
//!     ("accommodates", DataType::Int64),
//!     ("property_type", DataType::String),
//!     ("room_type", DataType::String),
//!     ("neighbourhood", DataType::String),
//!     ("latitude", DataType::Float64),
//!     ("longitude", DataType::Float64),
//! ] {
//!     builder = builder.add_column(name, dt).unwrap();
//! }
//! let schema = builder.build().unwrap();
//! let table = Table::new(schema, vec![Row::new(vec![
//!     Value::Float64(120.0),
//!     Value::Int64(2),
//!     Value::Int64(4),
//!     "Entire rental unit".into(),
//!     "Entire home".into(),
//!     "Gracia".into(),
//!     Value::Float64(41.40),
//!     Value::Float64(2.15),
//! ])])
//! .unwrap();
//!
//! let dataset = Dataset::new(table).unwrap().with_derived_columns().unwrap();
//! let filtered = ListingFilter::new().min_beds(1).apply(&dataset).unwrap();
//! let view = DashboardView::build(&filtered, &DashboardConfig::default()).unwrap();
//! assert!(view.report().is_some());
//! ```

#![no_std]

extern crate alloc;

mod config;
mod dataset;
mod filter;
mod histogram;
pub mod listing;
mod map;
mod summary;
mod view;

pub use config::{DashboardConfig, MapConfig};
pub use dataset::{round_to, Dataset};
pub use filter::{FilterBounds, ListingFilter};
pub use histogram::{Histogram, HistogramBin};
pub use map::{MapLayer, MapPoint, Midpoint};
pub use summary::PriceSummary;
pub use view::{BarSeries, CategoryPrices, DashboardView, Report};
