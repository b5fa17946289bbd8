use thiserror::Error;

use crate::domain::{ClassificationResult, Submission};

use super::state::{Ticket, ViewState};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("a submission is already in flight")]
pub struct SubmitRejected;

/// Per-visitor form: the two inputs plus the single view state they drive.
#[derive(Debug, Clone, Default)]
pub struct ClassificationForm {
    pub email: String,
    pub message: String,
    state: ViewState,
    next_ticket: u64,
}

impl ClassificationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.state.result()
    }

    /// Enters `Submitting` and hands back the submission to send.
    /// Rejected while a previous submission has not settled.
    pub fn begin_submit(
        &mut self,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<(Ticket, Submission), SubmitRejected> {
        if self.state.is_loading() {
            return Err(SubmitRejected);
        }

        self.email = email.into();
        self.message = message.into();
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.state = ViewState::Submitting { ticket };

        Ok((ticket, Submission::new(self.email.clone(), self.message.clone())))
    }

    /// Applies the outcome of `ticket`; returns false when the ticket is stale.
    pub fn settle(&mut self, ticket: Ticket, result: ClassificationResult) -> bool {
        match self.state {
            ViewState::Submitting { ticket: current } if current == ticket => {
                self.state = ViewState::Resolved(result);
                true
            }
            _ => false,
        }
    }
}
