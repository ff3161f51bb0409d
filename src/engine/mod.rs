// engine module: query execution against the forge

mod aggregate;
mod detail;
mod interface;
pub mod stub;

pub use aggregate::{Aggregator, FailurePolicy};
pub use detail::fetch_detail;
pub use interface::{Forge, SearchOptions};
pub use stub::StubForge;

pub use crate::types::{AggregatedReport, RepoBucket, RepoOutcome};
