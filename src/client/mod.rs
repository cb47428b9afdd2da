//! TaskFlow API Client
//!
//! Authenticated access to the TaskFlow API.
//!
//! # Endpoints
//!
//! - `POST /api/login` - Exchange credentials for a session record
//! - `GET /api/overview` - Aggregate project statistics
//! - `GET /api/products` - Project list (bare array or `{products: [...]}`)
//! - `GET /api/users` - Team members (bare array or `{users: [...]}`)
//!
//! Every request carries `Content-Type: application/json`; requests made
//! with a session token also carry `Authorization: Bearer <token>`.

pub mod dto;
pub mod error;
pub mod normalize;
pub mod scope;
pub mod transport;

pub use dto::{LoginRequest, Overview, Product, TeamMember};
pub use error::{ApiError, ApiResult};
pub use normalize::normalize_list;
pub use scope::ViewScope;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use dto::ErrorBody;

/// A logical read-only resource of the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Overview,
    Products,
    Users,
}

impl Resource {
    /// Path below the API origin
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Overview => "/api/overview",
            Resource::Products => "/api/products",
            Resource::Users => "/api/users",
        }
    }

    /// Field that wraps the list when the endpoint answers with an object
    pub fn list_field(&self) -> Option<&'static str> {
        match self {
            Resource::Overview => None,
            Resource::Products => Some("products"),
            Resource::Users => Some("users"),
        }
    }
}

/// Path of the login endpoint
pub const LOGIN_PATH: &str = "/api/login";

/// TaskFlow API client
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client for `base_url` over the given transport
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    /// Create a `reqwest`-backed client from configuration
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        let transport =
            ReqwestTransport::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::new(config.base_url.clone(), Arc::new(transport)))
    }

    /// API origin, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_headers(request: HttpRequest, token: Option<&str>) -> HttpRequest {
        let request = request.header("Content-Type", "application/json");
        match token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Exchange credentials for the raw session record.
    ///
    /// A non-success status yields [`ApiError::Status`] carrying the body's
    /// `message`, if any.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Value> {
        let body = serde_json::to_string(&LoginRequest { email, password })?;
        let request = Self::with_headers(HttpRequest::post(self.url(LOGIN_PATH), body), None);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                message: ErrorBody::message_from(&response.body),
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// GET a resource and return its parsed JSON body
    pub async fn fetch(&self, resource: Resource, token: Option<&str>) -> ApiResult<Value> {
        let request = Self::with_headers(HttpRequest::get(self.url(resource.path())), token);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                message: ErrorBody::message_from(&response.body),
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// GET a list resource, normalized to a plain list
    pub async fn fetch_list(&self, resource: Resource, token: Option<&str>) -> ApiResult<Vec<Value>> {
        let value = self.fetch(resource, token).await?;
        let field = resource.list_field().unwrap_or_default();
        Ok(normalize_list(value, field))
    }

    /// GET `/api/overview`
    pub async fn fetch_overview(&self, token: Option<&str>) -> ApiResult<Overview> {
        let value = self.fetch(Resource::Overview, token).await?;
        Ok(Overview::from_value(value))
    }

    /// GET `/api/products`
    pub async fn fetch_products(&self, token: Option<&str>) -> ApiResult<Vec<Product>> {
        let items = self.fetch_list(Resource::Products, token).await?;
        Ok(items.into_iter().map(Product::from_value).collect())
    }

    /// GET `/api/users`
    pub async fn fetch_users(&self, token: Option<&str>) -> ApiResult<Vec<TeamMember>> {
        let items = self.fetch_list(Resource::Users, token).await?;
        Ok(items.into_iter().map(TeamMember::from_value).collect())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport shared by the client, session and dashboard tests

    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    enum Reply {
        Ready(ApiResult<HttpResponse>),
        Deferred(oneshot::Receiver<ApiResult<HttpResponse>>),
    }

    /// Answers requests from a per-path script and records what it saw
    #[derive(Default)]
    pub struct ScriptedTransport {
        replies: Mutex<HashMap<String, Vec<Reply>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn push(&self, path: &str, reply: Reply) {
            self.replies
                .lock()
                .unwrap()
                .entry(path.to_string())
                .or_default()
                .push(reply);
        }

        /// Queue an immediate reply for `path`
        pub fn reply(&self, path: &str, status: u16, body: &str) {
            self.push(path, Reply::Ready(Ok(HttpResponse::new(status, body))));
        }

        /// Queue a transport failure for `path`
        pub fn fail(&self, path: &str, error: ApiError) {
            self.push(path, Reply::Ready(Err(error)));
        }

        /// Queue a reply for `path` that is released through the returned sender
        pub fn defer(&self, path: &str) -> oneshot::Sender<ApiResult<HttpResponse>> {
            let (tx, rx) = oneshot::channel();
            self.push(path, Reply::Deferred(rx));
            tx
        }

        /// Requests received so far
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
            let path = request
                .url
                .find("/api/")
                .map(|i| request.url[i..].to_string())
                .unwrap_or_default();
            self.seen.lock().unwrap().push(request);

            let reply = {
                let mut replies = self.replies.lock().unwrap();
                match replies.get_mut(&path) {
                    Some(queue) if !queue.is_empty() => queue.remove(0),
                    _ => return Ok(HttpResponse::new(404, r#"{"message":"no script"}"#)),
                }
            };

            match reply {
                Reply::Ready(result) => result,
                Reply::Deferred(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Transport("reply dropped".to_string()))),
            }
        }
    }

    pub fn client(transport: Arc<ScriptedTransport>) -> ApiClient {
        ApiClient::new("http://api.test/", transport)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{client, ScriptedTransport};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Overview.path(), "/api/overview");
        assert_eq!(Resource::Products.list_field(), Some("products"));
        assert_eq!(Resource::Users.list_field(), Some("users"));
        assert_eq!(Resource::Overview.list_field(), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = ScriptedTransport::new();
        assert_eq!(client(transport).base_url(), "http://api.test");
    }

    #[tokio::test]
    async fn test_headers_with_and_without_token() {
        let transport = ScriptedTransport::new();
        transport.reply("/api/overview", 200, "{}");
        transport.reply("/api/overview", 200, "{}");
        let api = client(transport.clone());

        api.fetch(Resource::Overview, Some("abc")).await.unwrap();
        api.fetch(Resource::Overview, None).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://api.test/api/overview");
        assert_eq!(requests[0].header_value("Content-Type"), Some("application/json"));
        assert_eq!(requests[0].header_value("Authorization"), Some("Bearer abc"));
        assert_eq!(requests[1].header_value("Content-Type"), Some("application/json"));
        assert_eq!(requests[1].header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let transport = ScriptedTransport::new();
        transport.reply("/api/login", 200, r#"{"email":"user1@example.com","token":"abc"}"#);
        let api = client(transport.clone());

        let record = api.login("user1@example.com", "password123").await.unwrap();
        assert_eq!(record, json!({"email": "user1@example.com", "token": "abc"}));

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        let sent: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, json!({"email": "user1@example.com", "password": "password123"}));
    }

    #[tokio::test]
    async fn test_login_rejection_carries_message() {
        let transport = ScriptedTransport::new();
        transport.reply("/api/login", 401, r#"{"message":"Wrong password"}"#);
        transport.reply("/api/login", 500, "Internal Server Error");
        let api = client(transport);

        let err = api.login("a@b.c", "x").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 401,
                message: Some("Wrong password".to_string())
            }
        );

        let err = api.login("a@b.c", "x").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                message: None
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_list_normalizes_both_shapes() {
        let transport = ScriptedTransport::new();
        transport.reply("/api/products", 200, r#"{"products":[{"name":"A"},{"title":"B"}]}"#);
        transport.reply("/api/users", 200, r#"[{"name":"Edwin"}]"#);
        let api = client(transport);

        let products = api.fetch_products(None).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].label(), Some("B"));

        let users = api.fetch_users(None).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name.as_deref(), Some("Edwin"));
    }

    #[tokio::test]
    async fn test_fetch_list_unknown_shape_is_empty() {
        let transport = ScriptedTransport::new();
        transport.reply("/api/products", 200, r#"{"items":[1,2,3]}"#);
        let api = client(transport);

        assert!(api.fetch_products(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_errors() {
        let transport = ScriptedTransport::new();
        transport.reply("/api/overview", 503, "");
        transport.reply("/api/overview", 200, "not json");
        transport.fail("/api/overview", ApiError::Transport("offline".to_string()));
        let api = client(transport);

        assert!(matches!(
            api.fetch_overview(None).await,
            Err(ApiError::Status { status: 503, .. })
        ));
        assert!(matches!(api.fetch_overview(None).await, Err(ApiError::Decode(_))));
        assert!(matches!(api.fetch_overview(None).await, Err(ApiError::Transport(_))));
    }
}
