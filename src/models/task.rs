use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task lifecycle states, in the backend's wire spelling (`on_progress`,
/// not `in_progress`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    OnProgress,
    Done,
    Expired,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::OnProgress => "On Progress",
            TaskStatus::Done => "Done",
            TaskStatus::Expired => "Expired",
        }
    }

    /// CSS utility classes the web UI attaches to a status badge
    pub fn class_attributes(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "text-rose-400 bg-rose-400/10",
            TaskStatus::OnProgress => "text-blue-400 bg-blue-400/10",
            TaskStatus::Done => "text-teal-400 bg-teal-400/10",
            TaskStatus::Expired => "text-orange-400 bg-orange-400/10",
        }
    }

    /// Bare accent color name for shells that don't speak CSS classes
    pub fn accent(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "rose",
            TaskStatus::OnProgress => "blue",
            TaskStatus::Done => "teal",
            TaskStatus::Expired => "orange",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }

    /// CSS utility classes the web UI attaches to a priority badge
    pub fn class_attributes(&self) -> &'static str {
        match self {
            TaskPriority::Low => "text-blue-400 bg-blue-400/10",
            TaskPriority::Medium => "text-teal-400 bg-teal-400/10",
            TaskPriority::High => "text-rose-400 bg-rose-400/10",
            TaskPriority::Urgent => "text-orange-400 bg-orange-400/10",
        }
    }

    /// Bare accent color name for shells that don't speak CSS classes
    pub fn accent(&self) -> &'static str {
        match self {
            TaskPriority::Low => "blue",
            TaskPriority::Medium => "teal",
            TaskPriority::High => "rose",
            TaskPriority::Urgent => "orange",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A task as served by the `/tasks` endpoints. Addressed by UUID everywhere,
/// the numeric database id never reaches the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
