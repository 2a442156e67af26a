pub mod aggregate;
pub mod filter;
pub mod review;

pub use aggregate::{Agent, ConfidenceBand, Rfp, Stage};
pub use filter::{DeadlineFilter, DeadlineSortKey, DeadlineTotals, DeadlineWindow};
pub use review::{PendingReviewSink, ReviewDecision, ReviewSink, ReviewSubmission};
