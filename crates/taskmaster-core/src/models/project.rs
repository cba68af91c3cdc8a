//! Project types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Ongoing,
    Pending,
    Completed,
    #[serde(other)]
    Unknown,
}

/// Which projects to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Completed,
    /// Planning, active and on-hold projects.
    Ongoing,
    Pending,
}

impl ProjectFilter {
    /// The `status` query value for this filter, if any.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            ProjectFilter::All => None,
            ProjectFilter::Completed => Some("completed"),
            ProjectFilter::Ongoing => Some("planning,active,on_hold"),
            ProjectFilter::Pending => Some("pending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOwner {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    /// Id of the member's user account.
    pub user: String,
    pub role: String,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub owner: Option<ProjectOwner>,
    #[serde(default)]
    pub members: Vec<ProjectMember>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
