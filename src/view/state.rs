use crate::domain::ClassificationResult;

/// Identifies one submission so a late settle cannot overwrite a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Submitting {
        ticket: Ticket,
    },
    Resolved(ClassificationResult),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Submitting { .. })
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            ViewState::Resolved(result) => Some(result),
            _ => None,
        }
    }
}
