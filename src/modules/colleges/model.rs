use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A college registered on the platform.
///
/// Deletion is soft: `is_active` flips to false and the row stays for
/// bookkeeping and admin lookups.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct College {
    pub id: i64,
    pub name: String,
    /// Short unique code, e.g. "MIT-01"
    pub code: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub established_year: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCollegeDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    pub description: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    #[validate(range(min = 1500, max = 2100))]
    pub established_year: Option<i32>,
}

/// Partial update; only provided fields are written.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCollegeDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    #[validate(range(min = 1500, max = 2100))]
    pub established_year: Option<i32>,
}

/// Course summary as shaped in the per-college course report.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CourseSummary {
    pub course_id: i64,
    pub title: String,
    pub category: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub duration_hours: Option<i32>,
    pub expected_completion_days: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Response for `GET /api/admin/colleges/{id}/courses`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CollegeCoursesResponse {
    pub college_id: i64,
    pub total_courses: usize,
    pub courses: Vec<CourseSummary>,
}
