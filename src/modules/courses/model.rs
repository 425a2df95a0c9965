use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// An admin-provided course belonging to a college.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i64,
    pub college_id: i64,
    pub title: String,
    pub category: Option<String>,
    /// Difficulty tag, e.g. "BEGINNER"
    pub level: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub duration_hours: Option<i32>,
    pub expected_completion_days: Option<i32>,
    pub is_active: bool,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    pub college_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub category: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub thumbnail_url: Option<String>,
    #[validate(range(min = 1))]
    pub duration_hours: Option<i32>,
    #[validate(range(min = 1))]
    pub expected_completion_days: Option<i32>,
    /// Courses start unpublished unless stated otherwise.
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub thumbnail_url: Option<String>,
    #[validate(range(min = 1))]
    pub duration_hours: Option<i32>,
    #[validate(range(min = 1))]
    pub expected_completion_days: Option<i32>,
    pub is_published: Option<bool>,
}
