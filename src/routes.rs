// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{evaluation, member, questionnaire, response},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (members, questionnaires, responses, evaluation).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (stores and configuration).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let member_routes = Router::new().route("/", get(member::list_members).post(member::create_member));

    let questionnaire_routes = Router::new()
        .route(
            "/",
            get(questionnaire::list_questionnaires).post(questionnaire::create_questionnaire),
        )
        .route("/{id}", get(questionnaire::get_questionnaire));

    // No update or delete routes: submissions are immutable.
    let response_routes =
        Router::new().route("/", get(response::list_responses).post(response::submit_response));

    let evaluation_routes = Router::new().route("/groups", get(evaluation::group_results));

    Router::new()
        .nest("/api/members", member_routes)
        .nest("/api/questionnaires", questionnaire_routes)
        .nest("/api/responses", response_routes)
        .nest("/api/evaluation", evaluation_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
