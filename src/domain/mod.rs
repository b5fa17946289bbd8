pub mod listing;
pub mod result;
pub mod submission;

pub use listing::{catalog, Listing};
pub use result::ClassificationResult;
pub use submission::Submission;
