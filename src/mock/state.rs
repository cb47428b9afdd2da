//! Mock API State
//!
//! Fixture data and issued tokens, shared by all handlers.

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

/// Email of the built-in fixture account
pub const FIXTURE_EMAIL: &str = "user1@example.com";

/// Password of the built-in fixture account
pub const FIXTURE_PASSWORD: &str = "password123";

/// Products served by default
pub const DEFAULT_PRODUCT_COUNT: usize = 24;

/// An account that can log in
#[derive(Debug, Clone)]
pub struct Account {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Fixture product
#[derive(Debug, Clone, Serialize)]
pub struct ProductFixture {
    pub id: u32,
    pub name: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
}

/// Fixture team member; fields mirror what the real API may omit
#[derive(Debug, Clone, Serialize)]
pub struct UserFixture {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(rename = "currentTask", skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Data served by the mock
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub accounts: Vec<Account>,
    /// `/api/overview` body, served verbatim
    pub overview: Value,
    pub products: Vec<ProductFixture>,
    pub users: Vec<UserFixture>,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            accounts: vec![Account {
                id: 1,
                name: "User One".to_string(),
                email: FIXTURE_EMAIL.to_string(),
                password: FIXTURE_PASSWORD.to_string(),
            }],
            // Empty so clients exercise their fallback chain
            overview: json!({}),
            products: generate_products(DEFAULT_PRODUCT_COUNT, Utc::now().date_naive()),
            users: default_users(),
        }
    }
}

impl Fixtures {
    /// Replace the overview body
    pub fn with_overview(mut self, overview: Value) -> Self {
        self.overview = overview;
        self
    }

    /// Replace the product list with `count` generated products
    pub fn with_product_count(mut self, count: usize) -> Self {
        self.products = generate_products(count, Utc::now().date_naive());
        self
    }
}

/// `count` products due every other day starting at `start`
pub fn generate_products(count: usize, start: NaiveDate) -> Vec<ProductFixture> {
    (0..count)
        .map(|i| ProductFixture {
            id: i as u32 + 1,
            name: format!("Project {}", i + 1),
            due_date: (start + Duration::days(2 * i as i64))
                .format("%b %-d, %Y")
                .to_string(),
        })
        .collect()
}

fn default_users() -> Vec<UserFixture> {
    vec![
        UserFixture {
            id: 1,
            name: Some("Alexandra Deff".to_string()),
            email: "alexandra@example.com".to_string(),
            current_task: Some("Github Project Repository".to_string()),
            status: Some("Completed".to_string()),
        },
        UserFixture {
            id: 2,
            name: Some("Edwin Adenike".to_string()),
            email: "edwin@example.com".to_string(),
            current_task: Some("Integrate User Authentication System".to_string()),
            status: Some("In Progress".to_string()),
        },
        // Name and task left out: clients fall back to the email and defaults
        UserFixture {
            id: 3,
            name: None,
            email: "isaac@example.com".to_string(),
            current_task: None,
            status: Some("pending".to_string()),
        },
        UserFixture {
            id: 4,
            name: Some("David Oshodi".to_string()),
            email: "david@example.com".to_string(),
            current_task: None,
            status: None,
        },
    ]
}

/// Shared mock server state
#[derive(Debug)]
pub struct MockState {
    pub fixtures: Fixtures,
    /// Issued token -> account id
    tokens: RwLock<HashMap<String, u32>>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl MockState {
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            fixtures,
            tokens: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Account matching the credentials
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Account> {
        self.fixtures
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == password)
    }

    /// Issue a fresh token for `account_id`
    pub fn issue_token(&self, account_id: u32) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.clone(), account_id);
        token
    }

    /// Whether `token` was issued by this server
    pub fn is_valid_token(&self, token: &str) -> bool {
        self.tokens
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(token)
    }

    pub fn token_count(&self) -> usize {
        self.tokens.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new(Fixtures::default())
    }
}
