mod catalog;
pub mod filter;
pub mod model;

pub use catalog::{demo_postings, load_postings};
pub use filter::{apply_filters, skill_catalog, FilterCriteria};
pub use model::{CompanySize, DurationBucket, Posting, PostedWithin, StipendRange, WorkMode};
