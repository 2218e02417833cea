use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use zoochat_auth::auth_routes;

use crate::{
    handlers::{
        assistants::{
            create_assistant, delete_assistant, get_assistant, list_assistants, update_assistant,
        },
        conversation::{convo_turn, delete_history, get_history, list_conversations},
        guardrails::{
            create_guardrail, delete_guardrail, get_guardrail, list_guardrails, update_guardrail,
        },
        health::{livez, readyz},
        user_details::{delete_user_details, get_user_details, put_user_details},
        users::{delete_user, get_user, list_users, update_user},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api_routes = Router::new()
        // Account routes
        .route("/users", get(list_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/users/{id}/details",
            get(get_user_details)
                .put(put_user_details)
                .delete(delete_user_details),
        )
        // Assistant and guardrail routes
        .route("/assistants", get(list_assistants).post(create_assistant))
        .route(
            "/assistants/{id}",
            get(get_assistant)
                .put(update_assistant)
                .delete(delete_assistant),
        )
        .route("/guardrails", get(list_guardrails).post(create_guardrail))
        .route(
            "/guardrails/{id}",
            get(get_guardrail)
                .put(update_guardrail)
                .delete(delete_guardrail),
        )
        // Conversation routes
        .route("/convo_turn", post(convo_turn))
        .route("/convo_history", get(get_history).delete(delete_history))
        .route("/conversations", get(list_conversations))
        .nest("/auth", auth_routes().with_state(state.auth.clone()))
        .layer(cors);

    let request_timeout = state.config.request_timeout;

    Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
