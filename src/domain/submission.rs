use chrono::{DateTime, Utc};

/// One visitor submission, built from the posted form.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub email: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            message: message.into(),
            submitted_at: Utc::now(),
        }
    }
}
