//! Dashboard widget data
//!
//! Project and team lists shown next to the stat cards, with the
//! placeholder content used when the API has nothing to offer.

use serde::Serialize;

use crate::client::{Product, TeamMember};

/// Projects listed on the dashboard
pub const MAX_PROJECTS: usize = 5;

/// Team members listed on the dashboard
pub const MAX_TEAM_MEMBERS: usize = 4;

/// Row of the project list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectEntry {
    pub name: String,
    pub due: String,
}

/// Row of the team list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamEntry {
    pub name: String,
    pub task: String,
    pub status: TaskStatus,
    /// Seed for the generated avatar
    pub avatar_seed: String,
}

/// Normalized task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Completed,
    InProgress,
    Pending,
    Todo,
}

impl TaskStatus {
    /// Parse a server status; unknown values are `Todo`
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "completed" => TaskStatus::Completed,
            "in progress" | "in-progress" => TaskStatus::InProgress,
            "pending" => TaskStatus::Pending,
            _ => TaskStatus::Todo,
        }
    }

    /// Badge text
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Pending => "Pending",
            TaskStatus::Todo => "Todo",
        }
    }
}

const PLACEHOLDER_PROJECTS: [(&str, &str); MAX_PROJECTS] = [
    ("Develop API Endpoints", "Nov 26, 2024"),
    ("Onboarding Flow", "Nov 28, 2024"),
    ("Build Dashboard", "Nov 30, 2024"),
    ("Optimize Page Load", "Dec 5, 2024"),
    ("Cross-Browser Testing", "Dec 6, 2024"),
];

const PLACEHOLDER_TEAM: [(&str, &str, TaskStatus); MAX_TEAM_MEMBERS] = [
    ("Alexandra Deff", "Github Project Repository", TaskStatus::Completed),
    ("Edwin Adenike", "Integrate User Authentication System", TaskStatus::InProgress),
    ("Isaac Oluwatemilorun", "Develop Search and Filter Functionality", TaskStatus::Pending),
    ("David Oshodi", "Responsive Layout for Homepage", TaskStatus::InProgress),
];

/// Up to five projects; placeholders when the list is empty
pub fn project_entries(products: &[Product]) -> Vec<ProjectEntry> {
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
        .take(MAX_PROJECTS)
        .enumerate()
        .map(|(i, p)| ProjectEntry {
            name: p
                .label()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Project {}", i + 1)),
            due: p
                .due()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Nov {}, 2024", 26 + i)),
        })
        .collect()
}

/// Up to four team members; placeholders when the list is empty
pub fn team_entries(users: &[TeamMember]) -> Vec<TeamEntry> {
    if users.is_empty() {
        return PLACEHOLDER_TEAM
            .iter()
            .map(|(name, task, status)| TeamEntry {
                name: name.to_string(),
                task: task.to_string(),
                status: *status,
                avatar_seed: name.split_whitespace().next().unwrap_or(name).to_string(),
            })
            .collect();
    }

    users
        .iter()
        .take(MAX_TEAM_MEMBERS)
        .enumerate()
        .map(|(i, u)| {
            let (_, fallback_task, fallback_status) = PLACEHOLDER_TEAM[i % MAX_TEAM_MEMBERS];

            let name = u
                .name
                .clone()
                .or_else(|| {
                    u.email
                        .as_deref()
                        .and_then(|e| e.split('@').next())
                        .filter(|local| !local.is_empty())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("User {}", i + 1));

            let avatar_seed = u
                .name
                .clone()
                .or_else(|| u.email.clone())
                .unwrap_or_else(|| i.to_string());

            TeamEntry {
                name,
                task: u
                    .current_task
                    .clone()
                    .unwrap_or_else(|| fallback_task.to_string()),
                status: u
                    .status
                    .as_deref()
                    .map(TaskStatus::parse)
                    .unwrap_or(fallback_status),
                avatar_seed,
            }
        })
        .collect()
}

/// One bar of the weekly analytics chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalyticsBar {
    pub day: char,
    /// Height in percent of the chart
    pub height: u8,
    pub filled: bool,
    pub highlighted: bool,
}

/// Weekly analytics series (placeholder data, Sunday first)
pub fn weekly_bars() -> [AnalyticsBar; 7] {
    const fn bar(day: char, height: u8, filled: bool, highlighted: bool) -> AnalyticsBar {
        AnalyticsBar {
            day,
            height,
            filled,
            highlighted,
        }
    }

    [
        bar('S', 60, false, false),
        bar('M', 65, true, false),
        bar('T', 50, true, true),
        bar('W', 88, true, false),
        bar('T', 90, false, false),
        bar('F', 50, false, false),
        bar('S', 60, false, false),
    ]
}
