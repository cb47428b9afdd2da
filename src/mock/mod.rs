//! TaskFlow Mock API
//!
//! Local stand-in for the TaskFlow API, built with Axum. It serves the same
//! endpoints and response shapes so the client, session store and dashboard
//! can be exercised without the hosted service.
//!
//! # Endpoints
//!
//! - `POST /api/login` - Fixture account `user1@example.com` / `password123`
//! - `GET /api/overview` - Overview snapshot
//! - `GET /api/products` - Products, wrapped as `{ "products": [...] }`
//! - `GET /api/users` - Team members, as a bare array
//! - `GET /health` - Health status
//!
//! Data endpoints require `Authorization: Bearer <token>` with a token issued
//! by this server's login endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use taskflow::config::MockServerConfig;
//! use taskflow::mock::{serve, Fixtures, MockState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = MockState::new(Fixtures::default());
//!     serve(state, &MockServerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod routes;
pub mod state;

pub use error::{MockApiError, MockResult};
pub use state::{Fixtures, MockState, FIXTURE_EMAIL, FIXTURE_PASSWORD};

use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::MockServerConfig;

/// Build the mock router with all routes and middleware
pub fn build_router(state: MockState) -> Router {
    let api_routes = Router::new()
        .route("/login", post(routes::login))
        .route("/overview", get(routes::overview))
        .route("/products", get(routes::products))
        .route("/users", get(routes::users));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(routes::health))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Start the mock API and run until Ctrl+C / SIGTERM
pub async fn serve(state: MockState, config: &MockServerConfig) -> Result<(), MockApiError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    serve_listener(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_listener<S>(
    listener: TcpListener,
    state: MockState,
    shutdown: S,
) -> Result<(), MockApiError>
where
    S: Future<Output = ()> + Send + 'static,
{
    let router = build_router(state);
    let addr = listener.local_addr()?;

    tracing::info!("TaskFlow mock API listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("TaskFlow mock API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        build_router(MockState::new(Fixtures::default().with_product_count(6)))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn login_request(email: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/login")
            .header("Content-Type", "application/json")
            .body(Body::from(
                json!({ "email": email, "password": password }).to_string(),
            ))
            .unwrap()
    }

    async fn login_token(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(login_request(FIXTURE_EMAIL, FIXTURE_PASSWORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    fn authed_get(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_login_success() {
        let app = create_test_app();

        let response = app
            .oneshot(login_request(FIXTURE_EMAIL, FIXTURE_PASSWORD))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["email"], FIXTURE_EMAIL);
        assert!(!body["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = create_test_app();

        let response = app
            .oneshot(login_request(FIXTURE_EMAIL, "nope"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_invalid_json() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_data_requires_token() {
        let app = create_test_app();

        for uri in ["/api/overview", "/api/products", "/api/users"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);

            let response = app.clone().oneshot(authed_get(uri, "forged")).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_data_shapes() {
        let app = create_test_app();
        let token = login_token(&app).await;

        let response = app
            .clone()
            .oneshot(authed_get("/api/overview", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({}));

        let response = app
            .clone()
            .oneshot(authed_get("/api/products", &token))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["products"].as_array().unwrap().len(), 6);
        assert!(body["products"][0]["dueDate"].is_string());

        let response = app
            .clone()
            .oneshot(authed_get("/api/users", &token))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 4);
        assert!(body[2].get("name").is_none());
    }

    #[tokio::test]
    async fn test_end_to_end_over_http() {
        use crate::client::ApiClient;
        use crate::config::ApiConfig;
        use crate::dashboard::Dashboard;
        use crate::guard::{Admission, RouterGuard, AFTER_LOGIN};
        use crate::session::{MemoryStorage, SessionStorage, SessionStore, SESSION_KEY};

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(serve_listener(
            listener,
            MockState::new(Fixtures::default()),
            async move {
                let _ = stopped.await;
            },
        ));

        let client = ApiClient::from_config(&ApiConfig {
            base_url: format!("http://{}/", addr),
            request_timeout_secs: 5,
        })
        .unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(client.clone(), storage.clone());

        let err = session.login(FIXTURE_EMAIL, "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");

        let record = session.login(FIXTURE_EMAIL, FIXTURE_PASSWORD).await.unwrap();
        assert_eq!(record.email(), Some(FIXTURE_EMAIL));
        assert!(storage.get_item(SESSION_KEY).unwrap().is_some());
        assert_eq!(
            RouterGuard::new(&session).admit(AFTER_LOGIN),
            Admission::Render(AFTER_LOGIN)
        );

        let dashboard = Dashboard::mount(client, &session);
        let state = dashboard.settled().await;
        assert_eq!(state.overview.error, None);
        assert_eq!(state.products.error, None);
        assert_eq!(state.users.error, None);

        let stats = dashboard.stats();
        assert_eq!(stats.total_projects, 24);
        assert_eq!(stats.ended_projects, 10);
        assert_eq!(stats.running_projects, 12);
        assert_eq!(stats.pending_projects, 2);

        let team = dashboard.team();
        assert_eq!(team[2].name, "isaac");
        assert_eq!(team[3].task, "Responsive Layout for Homepage");
        dashboard.unmount();

        session.logout();
        assert_eq!(storage.get_item(SESSION_KEY).unwrap(), None);

        stop.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Not found");
    }
}
