//! Analysis and filtering over extracted invoice records.

mod duplicates;
mod filter;
mod stats;

pub use duplicates::find_duplicates;
pub use filter::filter_by_type;
pub use stats::summarize;
