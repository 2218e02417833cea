//! HTTP handlers for auth routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use zoochat_core::auth::AuthError as CoreError;
use zoochat_core::storage::RepositoryError;
use zoochat_core::user::{
    normalize_email, validate_registration, LoginRequest, RegisterRequest, TokenResponse, User,
    UserRole,
};

use crate::error::AuthError;
use crate::extractors::{AuthJson, CurrentUser};
use crate::password::{hash_password, verify_dummy_password, verify_password};
use crate::tokens::issue_token;
use crate::AuthState;

/// Creates the auth router.
///
/// Routes (relative to where the router is nested):
/// - `POST /register` - Create an account and return a token
/// - `POST /login` - Exchange email and password for a token
/// - `GET /me` - Get current authenticated user
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

#[tracing::instrument(skip_all, fields(email = %request.email))]
async fn register(
    State(state): State<AuthState>,
    AuthJson(request): AuthJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AuthError> {
    validate_registration(&request)?;

    let email = normalize_email(&request.email);
    if state.users.get_user_by_email(&email).await?.is_some() {
        return Err(RepositoryError::AlreadyExists {
            entity_type: "User",
            id: email,
        }
        .into());
    }

    let role = if state.config.is_admin_email(&email) {
        UserRole::Admin
    } else {
        UserRole::User
    };

    let password_hash = hash_password(&request.password)?;
    let user = User::new(email, request.name.trim(), password_hash).with_role(role);
    state.users.create_user(&user).await?;

    tracing::info!(user_id = %user.id, role = %user.role, "Registered user");

    let issued = issue_token(&state.config, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(TokenResponse::bearer(issued.token, issued.expires_at, user)),
    ))
}

#[tracing::instrument(skip_all, fields(email = %request.email))]
async fn login(
    State(state): State<AuthState>,
    AuthJson(request): AuthJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let email = normalize_email(&request.email);

    let Some(user) = state.users.get_user_by_email(&email).await? else {
        tracing::debug!("Login for unknown email");
        verify_dummy_password(&request.password);
        return Err(CoreError::InvalidCredentials.into());
    };

    if !verify_password(&request.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Login with wrong password");
        return Err(CoreError::InvalidCredentials.into());
    }

    let issued = issue_token(&state.config, &user)?;
    Ok(Json(TokenResponse::bearer(
        issued.token,
        issued.expires_at,
        user,
    )))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use http_body_util::BodyExt;
    use tokio::sync::RwLock;
    use tower::ServiceExt;
    use uuid::Uuid;
    use zoochat_core::storage::{Result, UserRepository};

    use super::*;
    use crate::AuthConfig;

    #[derive(Default)]
    struct Users(RwLock<HashMap<Uuid, User>>);

    #[async_trait]
    impl UserRepository for Users {
        async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
            Ok(self.0.read().await.get(&id).cloned())
        }

        async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
            Ok(self
                .0
                .read()
                .await
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn list_users(&self) -> Result<Vec<User>> {
            Ok(self.0.read().await.values().cloned().collect())
        }

        async fn create_user(&self, user: &User) -> Result<()> {
            self.0.write().await.insert(user.id, user.clone());
            Ok(())
        }

        async fn update_user(&self, user: &User) -> Result<()> {
            self.create_user(user).await
        }

        async fn delete_user(&self, id: Uuid) -> Result<()> {
            self.0.write().await.remove(&id);
            Ok(())
        }
    }

    /// Storage that is unreachable for every call.
    struct Unreachable;

    #[async_trait]
    impl UserRepository for Unreachable {
        async fn get_user(&self, _id: Uuid) -> Result<Option<User>> {
            Err(RepositoryError::ConnectionFailed("dispatch failure".to_string()))
        }

        async fn get_user_by_email(&self, _email: &str) -> Result<Option<User>> {
            Err(RepositoryError::ConnectionFailed("dispatch failure".to_string()))
        }

        async fn list_users(&self) -> Result<Vec<User>> {
            Err(RepositoryError::ConnectionFailed("dispatch failure".to_string()))
        }

        async fn create_user(&self, _user: &User) -> Result<()> {
            Err(RepositoryError::ConnectionFailed("dispatch failure".to_string()))
        }

        async fn update_user(&self, _user: &User) -> Result<()> {
            Err(RepositoryError::ConnectionFailed("dispatch failure".to_string()))
        }

        async fn delete_user(&self, _id: Uuid) -> Result<()> {
            Err(RepositoryError::ConnectionFailed("dispatch failure".to_string()))
        }
    }

    fn test_config() -> AuthConfig {
        AuthConfig::new("handler-test-secret-0123456789abcdef")
            .unwrap()
            .with_admin_emails("keeper@zoo.test")
    }

    fn app() -> Router {
        auth_routes().with_state(AuthState::new(Arc::new(Users::default()), test_config()))
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn registration(email: &str) -> serde_json::Value {
        serde_json::json!({"email": email, "password": "hunter22!", "name": "Sam"})
    }

    #[tokio::test]
    async fn register_login_me() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request("/register", registration("Sam@Zoo.test")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let registered = body_json(response).await;
        assert_eq!(registered["user"]["email"], "sam@zoo.test");
        assert_eq!(registered["user"]["role"], "user");
        assert!(registered["user"].get("password_hash").is_none());

        let response = app
            .clone()
            .oneshot(json_request(
                "/login",
                serde_json::json!({"email": "sam@zoo.test", "password": "hunter22!"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "Sam");
    }

    #[tokio::test]
    async fn admin_emails_register_as_admin() {
        let response = app()
            .oneshot(json_request("/register", registration("keeper@zoo.test")))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["user"]["role"], "admin");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let app = app();
        app.clone()
            .oneshot(json_request("/register", registration("sam@zoo.test")))
            .await
            .unwrap();

        let response = app
            .oneshot(json_request("/register", registration("SAM@zoo.test")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn invalid_registration_is_unprocessable() {
        let response = app()
            .oneshot(json_request(
                "/register",
                serde_json::json!({"email": "nope", "password": "hunter22!", "name": "Sam"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn login_failures_look_the_same() {
        let app = app();
        app.clone()
            .oneshot(json_request("/register", registration("sam@zoo.test")))
            .await
            .unwrap();

        let wrong_password = app
            .clone()
            .oneshot(json_request(
                "/login",
                serde_json::json!({"email": "sam@zoo.test", "password": "nope-nope"}),
            ))
            .await
            .unwrap();
        let unknown_email = app
            .oneshot(json_request(
                "/login",
                serde_json::json!({"email": "ghost@zoo.test", "password": "hunter22!"}),
            ))
            .await
            .unwrap();

        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(wrong_password).await, body_json(unknown_email).await);
    }

    #[tokio::test]
    async fn me_requires_token() {
        let response = app()
            .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(header::AUTHORIZATION, "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_email_still_runs_a_password_check() {
        let before = crate::password::dummy_verifications();

        let response = app()
            .oneshot(json_request(
                "/login",
                serde_json::json!({"email": "ghost@zoo.test", "password": "hunter22!"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(crate::password::dummy_verifications() > before);
    }

    #[tokio::test]
    async fn storage_outage_is_service_unavailable() {
        let config = test_config();
        let user = User::new("sam@zoo.test", "Sam", "hash");
        let token = crate::tokens::issue_token(&config, &user).unwrap().token;
        let app = auth_routes().with_state(AuthState::new(Arc::new(Unreachable), config));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["error"], "Internal server error");
    }

    #[tokio::test]
    async fn malformed_body_gets_json_error() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"email\": \"sam@zoo.test\""))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());

        let response = app()
            .oneshot(json_request("/register", serde_json::json!({"email": "sam@zoo.test"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_json(response).await["error"].is_string());
    }
}
