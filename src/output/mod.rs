pub mod formatter;
pub mod listing;

pub use formatter::{JsonOutput, OutputFormatter};
pub use listing::Listing;
