use std::{path::Path, sync::Arc};

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};
use uuid::Uuid;

use crate::{domain::catalog, view::ClassificationForm};

use super::{
    pages::{render, IndexTemplate},
    AppState,
};

pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/classify", post(classify))
        .route("/healthz", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    session: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClassifyForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    mensagem: String,
    session: Option<String>,
}

fn parse_session(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(|value| Uuid::parse_str(value.trim()).ok())
}

async fn index(State(state): State<Arc<AppState>>, Query(query): Query<PageQuery>) -> Response {
    let session = parse_session(query.session.as_deref());
    let form = session.and_then(|id| state.sessions.snapshot(&id));

    let template = match (session, form) {
        (Some(id), Some(form)) => IndexTemplate::new(
            Some(id.to_string()),
            &form,
            catalog(),
            state.config.sessions.pending_refresh_secs,
        ),
        _ => IndexTemplate::new(
            None,
            &ClassificationForm::new(),
            catalog(),
            state.config.sessions.pending_refresh_secs,
        ),
    };
    render(&template)
}

async fn classify(State(state): State<Arc<AppState>>, Form(form): Form<ClassifyForm>) -> Redirect {
    let requested = parse_session(form.session.as_deref());
    let (id, outcome) = state
        .sessions
        .begin_submit(requested, form.email, form.mensagem);

    match outcome {
        Ok((ticket, submission)) => {
            tracing::info!(
                target: "web",
                session = %id,
                email_present = !submission.email.trim().is_empty(),
                chars = submission.message.chars().count(),
                "submission accepted"
            );
            let sessions = state.sessions.clone();
            let classifier = state.classifier.clone();
            tokio::spawn(async move {
                let result = classifier.resolve(&submission).await;
                let failed = result.is_error();
                if !sessions.settle(&id, ticket, result) {
                    tracing::debug!(
                        target: "sessions",
                        session = %id,
                        failed,
                        "session gone before classification settled"
                    );
                }
            });
        }
        Err(err) => {
            tracing::info!(
                target: "web",
                session = %id,
                reason = %err,
                "overlapping submission ignored"
            );
        }
    }

    Redirect::to(&format!("/?session={id}"))
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "sessions": state.sessions.len(),
    }))
}
