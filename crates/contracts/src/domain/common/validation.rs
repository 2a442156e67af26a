use thiserror::Error;

/// Numeric entry fields of the inventory add dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Stock,
    LeadTime,
    AvgCost,
    BasePrice,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Stock => "Stock",
            DraftField::LeadTime => "Lead time",
            DraftField::AvgCost => "Avg cost",
            DraftField::BasePrice => "Base price",
        }
    }
}

/// Input rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} cannot be negative", .0.label())]
    Negative(DraftField),

    #[error("{} must be a number", .0.label())]
    NotFinite(DraftField),

    #[error("{} must be a whole number", .0.label())]
    NotWholeNumber(DraftField),

    #[error("Malformed SKU: {0}")]
    MalformedSku(String),

    #[error("Comment cannot be empty")]
    EmptyComment,
}

impl ValidationError {
    /// The dialog field the message belongs to, if any.
    pub fn field(&self) -> Option<DraftField> {
        match self {
            ValidationError::Negative(field)
            | ValidationError::NotFinite(field)
            | ValidationError::NotWholeNumber(field) => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        assert_eq!(
            ValidationError::Negative(DraftField::Stock).to_string(),
            "Stock cannot be negative"
        );
        assert_eq!(
            ValidationError::Negative(DraftField::LeadTime).to_string(),
            "Lead time cannot be negative"
        );
        assert_eq!(
            ValidationError::Negative(DraftField::AvgCost).to_string(),
            "Avg cost cannot be negative"
        );
        assert_eq!(
            ValidationError::Negative(DraftField::BasePrice).to_string(),
            "Base price cannot be negative"
        );
        assert_eq!(ValidationError::EmptyComment.field(), None);
    }
}
