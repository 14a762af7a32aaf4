//! Table operators used by the aggregation pipeline.

mod aggregate;
mod merge;
mod project;
mod sort;

pub use aggregate::GroupAggregator;
pub use merge::OuterMerge;
pub use project::ProjectExecutor;
pub use sort::{SortExecutor, SortOrder};
