//! Data Transfer Objects
//!
//! Request and response types for the TaskFlow API. Response types are
//! parsed leniently: a field of the wrong JSON type counts as absent instead
//! of failing the whole response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================
// LOGIN
// ============================================

/// `POST /api/login` body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Error body of a rejected request
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Pull the `message` out of a raw error body, if any
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
    }
}

// ============================================
// OVERVIEW
// ============================================

/// `GET /api/overview` snapshot; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Overview {
    #[serde(rename = "totalProjects", default, deserialize_with = "lenient_count")]
    pub total_projects: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<i64>,

    #[serde(rename = "endedProjects", default, deserialize_with = "lenient_count")]
    pub ended_projects: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub ended: Option<i64>,

    #[serde(rename = "runningProjects", default, deserialize_with = "lenient_count")]
    pub running_projects: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub running: Option<i64>,

    #[serde(rename = "pendingProjects", default, deserialize_with = "lenient_count")]
    pub pending_projects: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub pending: Option<i64>,

    #[serde(rename = "completionRate", default, deserialize_with = "lenient_number")]
    pub completion_rate: Option<f64>,
}

impl Overview {
    /// Parse an overview body; anything but an object is an empty overview
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    pub fn total(&self) -> Option<i64> {
        self.total_projects.or(self.total)
    }

    pub fn ended(&self) -> Option<i64> {
        self.ended_projects.or(self.ended)
    }

    pub fn running(&self) -> Option<i64> {
        self.running_projects.or(self.running)
    }

    pub fn pending(&self) -> Option<i64> {
        self.pending_projects.or(self.pending)
    }
}

// ============================================
// PRODUCTS / USERS
// ============================================

/// Item of `GET /api/products`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(rename = "dueDate", default, deserialize_with = "lenient_text")]
    pub due_date: Option<String>,
    #[serde(rename = "due_date", default, deserialize_with = "lenient_text")]
    pub due_date_snake: Option<String>,
}

impl Product {
    /// Parse one list item; non-objects become an all-absent product
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// `name`, else `title`
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.title.as_deref())
    }

    /// `dueDate`, else `due_date`
    pub fn due(&self) -> Option<&str> {
        self.due_date.as_deref().or(self.due_date_snake.as_deref())
    }
}

/// Item of `GET /api/users`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TeamMember {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(rename = "currentTask", default, deserialize_with = "lenient_text")]
    pub current_task: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

impl TeamMember {
    /// Parse one list item; non-objects become an all-absent member
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

// ============================================
// Lenient field parsers
// ============================================

/// Integer count; floats are rounded, anything else is absent
pub(crate) fn count_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.round() as i64)
        }),
        _ => None,
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|f| f.is_finite()))
}

/// Non-empty string; empty strings and other types are absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overview_long_names_win() {
        let overview = Overview::from_value(json!({
            "totalProjects": 30,
            "total": 5,
            "ended": 7,
            "runningProjects": 11,
            "completionRate": 55.5
        }));

        assert_eq!(overview.total(), Some(30));
        assert_eq!(overview.ended(), Some(7));
        assert_eq!(overview.running(), Some(11));
        assert_eq!(overview.pending(), None);
        assert_eq!(overview.completion_rate, Some(55.5));
    }

    #[test]
    fn test_overview_zero_is_present() {
        let overview = Overview::from_value(json!({ "totalProjects": 0, "total": 9 }));
        assert_eq!(overview.total(), Some(0));
    }

    #[test]
    fn test_overview_lenient_types() {
        let overview = Overview::from_value(json!({
            "totalProjects": "many",
            "total": 12.6,
            "ended": null,
            "running": true,
            "completionRate": "50%"
        }));

        assert_eq!(overview.total(), Some(13));
        assert_eq!(overview.ended(), None);
        assert_eq!(overview.running(), None);
        assert_eq!(overview.completion_rate, None);
    }

    #[test]
    fn test_overview_from_non_object() {
        assert_eq!(Overview::from_value(json!([1, 2])), Overview::default());
        assert_eq!(Overview::from_value(json!(null)), Overview::default());
    }

    #[test]
    fn test_product_fallbacks() {
        let product = Product::from_value(json!({
            "title": "Build Dashboard",
            "due_date": "Dec 1, 2024",
            "name": ""
        }));
        assert_eq!(product.label(), Some("Build Dashboard"));
        assert_eq!(product.due(), Some("Dec 1, 2024"));

        let product = Product::from_value(json!({ "name": "API", "title": "x", "dueDate": "Jan 2" }));
        assert_eq!(product.label(), Some("API"));
        assert_eq!(product.due(), Some("Jan 2"));

        assert_eq!(Product::from_value(json!("oops")), Product::default());
    }

    #[test]
    fn test_team_member_parse() {
        let member = TeamMember::from_value(json!({
            "email": "edwin@example.com",
            "currentTask": "Auth",
            "status": "in-progress",
            "id": 4
        }));
        assert_eq!(member.name, None);
        assert_eq!(member.email.as_deref(), Some("edwin@example.com"));
        assert_eq!(member.current_task.as_deref(), Some("Auth"));
        assert_eq!(member.status.as_deref(), Some("in-progress"));
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ErrorBody::message_from(r#"{"message":"Wrong password"}"#).as_deref(),
            Some("Wrong password")
        );
        assert_eq!(ErrorBody::message_from(r#"{"message":""}"#), None);
        assert_eq!(ErrorBody::message_from(r#"{"error":"x"}"#), None);
        assert_eq!(ErrorBody::message_from("<html>502</html>"), None);
    }

    #[test]
    fn test_login_request_serializes() {
        let body = serde_json::to_value(LoginRequest {
            email: "user1@example.com",
            password: "password123",
        })
        .unwrap();
        assert_eq!(body, json!({"email": "user1@example.com", "password": "password123"}));
    }
}
