//! Dashboard Data
//!
//! Derived figures and lists for the dashboard widgets. Each figure uses the
//! overview field when present, then a value derived from the product list,
//! then a fixed placeholder.

use serde_json::Value;

pub const PLACEHOLDER_TOTAL: i64 = 24;
pub const ENDED_RATIO: f64 = 0.42;
pub const RUNNING_RATIO: f64 = 0.5;
pub const PLACEHOLDER_COMPLETION: f64 = 41.0;

/// Figures shown on the stat cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectStats {
    pub total: i64,
    pub ended: i64,
    pub running: i64,
    /// May be negative when the overview is inconsistent
    pub pending: i64,
    pub completion: f64,
}

fn count(overview: Option<&Value>, long: &str, short: &str) -> Option<i64> {
    let overview = overview?;
    [long, short].iter().find_map(|k| {
        let n = overview.get(*k)?;
        n.as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
    })
}

/// JavaScript-style rounding, halves up
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

impl ProjectStats {
    pub fn derive(overview: Option<&Value>, products: Option<&[Value]>) -> Self {
        let total = count(overview, "totalProjects", "total")
            .or_else(|| products.map(|p| p.len() as i64))
            .unwrap_or(PLACEHOLDER_TOTAL);
        let ended = count(overview, "endedProjects", "ended")
            .unwrap_or_else(|| round_half_up(total as f64 * ENDED_RATIO));
        let running = count(overview, "runningProjects", "running")
            .unwrap_or_else(|| round_half_up(total as f64 * RUNNING_RATIO));
        let pending = count(overview, "pendingProjects", "pending")
            .unwrap_or_else(|| total.wrapping_sub(ended).wrapping_sub(running));

        let completion = overview
            .and_then(|o| o.get("completionRate"))
            .and_then(Value::as_f64)
            .unwrap_or_else(|| {
                if total > 0 {
                    round_half_up(ended as f64 / total as f64 * 100.0) as f64
                } else {
                    PLACEHOLDER_COMPLETION
                }
            });

        Self {
            total,
            ended,
            running,
            pending,
            completion,
        }
    }
}

/// Normalized task status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Completed,
    InProgress,
    Pending,
    Todo,
}

impl TaskStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "completed" => TaskStatus::Completed,
            "in progress" | "in-progress" => TaskStatus::InProgress,
            "pending" => TaskStatus::Pending,
            _ => TaskStatus::Todo,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Pending => "Pending",
            TaskStatus::Todo => "Todo",
        }
    }

    /// Badge colors
    pub fn badge_class(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "bg-green-100 text-green-700",
            TaskStatus::InProgress => "bg-yellow-100 text-yellow-700",
            TaskStatus::Pending => "bg-red-100 text-red-700",
            TaskStatus::Todo => "bg-gray-100 text-gray-700",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEntry {
    pub name: String,
    pub due: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamEntry {
    pub name: String,
    pub task: String,
    pub status: TaskStatus,
    pub avatar_seed: String,
}

const PLACEHOLDER_PROJECTS: [(&str, &str); 5] = [
    ("Develop API Endpoints", "Nov 26, 2024"),
    ("Onboarding Flow", "Nov 28, 2024"),
    ("Build Dashboard", "Nov 30, 2024"),
    ("Optimize Page Load", "Dec 5, 2024"),
    ("Cross-Browser Testing", "Dec 6, 2024"),
];

const PLACEHOLDER_TEAM: [(&str, &str, TaskStatus); 4] = [
    ("Alexandra Deff", "Github Project Repository", TaskStatus::Completed),
    ("Edwin Adenike", "Integrate User Authentication System", TaskStatus::InProgress),
    ("Isaac Oluwatemilorun", "Develop Search and Filter Functionality", TaskStatus::Pending),
    ("David Oshodi", "Responsive Layout for Homepage", TaskStatus::InProgress),
];

fn text<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

pub fn project_entries(products: &[Value]) -> Vec<ProjectEntry> {
    if products.is_empty() {
        return PLACEHOLDER_PROJECTS
            .iter()
            .map(|(name, due)| ProjectEntry {
                name: name.to_string(),
                due: due.to_string(),
            })
            .collect();
    }

    products
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, p)| ProjectEntry {
            name: text(p, "name")
                .or_else(|| text(p, "title"))
                .map(str::to_string)
                .unwrap_or_else(|| format!("Project {}", i + 1)),
            due: text(p, "dueDate")
                .or_else(|| text(p, "due_date"))
                .map(str::to_string)
                .unwrap_or_else(|| format!("Nov {}, 2024", 26 + i)),
        })
        .collect()
}

pub fn team_entries(users: &[Value]) -> Vec<TeamEntry> {
    if users.is_empty() {
        return PLACEHOLDER_TEAM
            .iter()
            .map(|(name, task, status)| TeamEntry {
                name: name.to_string(),
                task: task.to_string(),
                status: *status,
                avatar_seed: name.to_string(),
            })
            .collect();
    }

    users
        .iter()
        .take(4)
        .enumerate()
        .map(|(i, u)| {
            let (_, task, status) = PLACEHOLDER_TEAM[i % 4];
            let email = text(u, "email");
            TeamEntry {
                name: text(u, "name")
                    .or_else(|| email.and_then(|e| e.split('@').next()).filter(|s| !s.is_empty()))
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("User {}", i + 1)),
                task: text(u, "currentTask").unwrap_or(task).to_string(),
                status: text(u, "status").map(TaskStatus::parse).unwrap_or(status),
                avatar_seed: text(u, "name")
                    .or(email)
                    .map(str::to_string)
                    .unwrap_or_else(|| i.to_string()),
            }
        })
        .collect()
}

/// Weekly analytics bars: (day, height %, filled, highlighted)
pub const WEEK_BARS: [(char, u8, bool, bool); 7] = [
    ('S', 60, false, false),
    ('M', 65, true, false),
    ('T', 50, true, true),
    ('W', 88, true, false),
    ('T', 90, false, false),
    ('F', 50, false, false),
    ('S', 60, false, false),
];

/// `HH:MM:SS`
pub fn format_hms(total_secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_overview_with_24_products() {
        let products = vec![json!({}); 24];
        let stats = ProjectStats::derive(Some(&json!({})), Some(&products));
        assert_eq!((stats.total, stats.ended, stats.running, stats.pending), (24, 10, 12, 2));
        assert_eq!(stats.completion, 42.0);
    }

    #[test]
    fn test_overview_wins_and_pending_may_go_negative() {
        let overview = json!({ "totalProjects": 10, "ended": 8, "runningProjects": 7 });
        let stats = ProjectStats::derive(Some(&overview), None);
        assert_eq!(stats.pending, -5);
    }

    #[test]
    fn test_extreme_counts_do_not_overflow() {
        let overview = json!({ "totalProjects": i64::MIN, "endedProjects": i64::MAX, "runningProjects": 0 });
        let stats = ProjectStats::derive(Some(&overview), None);
        assert_eq!(stats.pending, i64::MIN.wrapping_sub(i64::MAX));
    }

    #[test]
    fn test_placeholders() {
        let stats = ProjectStats::derive(None, None);
        assert_eq!(stats.total, PLACEHOLDER_TOTAL);
        assert_eq!(project_entries(&[]).len(), 5);
        assert_eq!(team_entries(&[])[0].name, "Alexandra Deff");
    }

    #[test]
    fn test_team_fallbacks() {
        let team = team_entries(&[json!({ "email": "grace@example.com" })]);
        assert_eq!(team[0].name, "grace");
        assert_eq!(team[0].status, TaskStatus::Completed);
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(5048), "01:24:08");
    }
}
