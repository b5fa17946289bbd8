use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    domain::{ClassificationResult, Listing},
    view::{ClassificationForm, ViewState},
};

pub struct ResultView {
    pub category: String,
    pub confidence: String,
}

impl From<&ClassificationResult> for ResultView {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            category: result.display_category(),
            confidence: result.display_confidence(),
        }
    }
}

/// What sits below the form. Only one of these is ever rendered.
pub enum Panel {
    Empty,
    Pending,
    Result(ResultView),
}

impl From<&ViewState> for Panel {
    fn from(state: &ViewState) -> Self {
        match state {
            ViewState::Idle => Panel::Empty,
            ViewState::Submitting { .. } => Panel::Pending,
            ViewState::Resolved(result) => Panel::Result(result.into()),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub session: Option<String>,
    pub email: String,
    pub message: String,
    pub loading: bool,
    pub refresh_secs: u64,
    pub panel: Panel,
    pub listings: Vec<Listing>,
}

impl IndexTemplate {
    pub fn new(
        session: Option<String>,
        form: &ClassificationForm,
        listings: Vec<Listing>,
        refresh_secs: u64,
    ) -> Self {
        Self {
            session,
            email: form.email.clone(),
            message: form.message.clone(),
            loading: form.is_loading(),
            refresh_secs,
            panel: form.state().into(),
            listings,
        }
    }
}

pub fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(body) => Html(body).into_response(),
        Err(err) => {
            tracing::error!(target: "web", error = %err, "template rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
