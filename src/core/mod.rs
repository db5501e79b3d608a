pub mod dataset;
pub mod filter;
pub mod types;

pub use dataset::{ColumnMapping, DataSource, Dataset, LoadOptions};
pub use filter::{filter_by_payload_range, filter_by_site, filter_for_scatter};
pub use types::{
    ALL_SITES, LaunchRecord, OutcomeClass, PayloadBounds, PayloadRange, SelectionState,
    SiteSelection,
};
