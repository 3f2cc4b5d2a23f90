pub mod error;
pub mod extract;
pub mod fetcher;
pub mod fragment;

pub use error::SpliceError;
pub use extract::{ExtractRule, Matcher, roadmap_rules};
pub use fetcher::FragmentFetcher;
pub use fragment::{ExtractedBlock, Fragment};
