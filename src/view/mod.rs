mod form;
mod state;

pub use form::{ClassificationForm, SubmitRejected};
pub use state::{Ticket, ViewState};
