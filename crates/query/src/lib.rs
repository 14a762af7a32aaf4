//! staystat Query - Group aggregation engine for staystat tables.
//!
//! This crate provides:
//!
//! - `aggregate`: group a table by key columns and compute mean/min/max of
//!   the remaining measure column into one wide table
//! - `Statistic`: the supported reductions
//! - `executor`: the group, outer merge, projection and sort operators the
//!   aggregation is assembled from
//! - `cache`: memoization of aggregation results over one table snapshot

#![no_std]

extern crate alloc;

pub mod cache;
pub mod executor;
mod group_by;
mod statistic;

pub use cache::AggregateCache;
pub use group_by::{aggregate, aggregate_with};
pub use statistic::Statistic;
