use crate::domain::common::validation::ValidationError;
use crate::store::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Decision a reviewer can record against an RFP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    RequestRevision,
    Comment,
    Reject,
}

impl ReviewDecision {
    pub fn label(&self) -> &'static str {
        match self {
            ReviewDecision::Approve => "Approve",
            ReviewDecision::RequestRevision => "Request Revision",
            ReviewDecision::Comment => "Add Comment",
            ReviewDecision::Reject => "Reject",
        }
    }

    pub fn all() -> [ReviewDecision; 4] {
        [
            ReviewDecision::Approve,
            ReviewDecision::RequestRevision,
            ReviewDecision::Comment,
            ReviewDecision::Reject,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub rfp_id: String,
    pub decision: ReviewDecision,
    pub comment: Option<String>,
}

impl ReviewSubmission {
    /// A bare comment needs text; the other decisions take an optional note.
    pub fn new(
        rfp_id: impl Into<String>,
        decision: ReviewDecision,
        comment: &str,
    ) -> Result<Self, ValidationError> {
        let comment = comment.trim();
        if decision == ReviewDecision::Comment && comment.is_empty() {
            return Err(ValidationError::EmptyComment);
        }

        Ok(Self {
            rfp_id: rfp_id.into(),
            decision,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        })
    }
}

/// Destination for review decisions.
#[async_trait(?Send)]
pub trait ReviewSink {
    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<(), StoreError>;
}

/// The only sink shipped so far: the upstream write path does not exist yet,
/// so every submission is reported back as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingReviewSink;

#[async_trait(?Send)]
impl ReviewSink for PendingReviewSink {
    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<(), StoreError> {
        log::info!(
            "review {:?} for {} not sent: no review endpoint",
            submission.decision,
            submission.rfp_id
        );
        Err(StoreError::Unsupported(
            "review decisions cannot be recorded yet".to_string(),
        ))
    }
}
