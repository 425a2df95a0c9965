use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use crate::utils::errors::AppError;

use super::model::{Course, CreateCourseDto, UpdateCourseDto};

const COURSE_COLUMNS: &str = "id, college_id, title, category, level, description, thumbnail_url, \
                              duration_hours, expected_completion_days, is_active, is_published, \
                              created_at, updated_at";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto), fields(college.id = %dto.college_id, db.operation = "INSERT", db.table = "courses"))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        debug!(course.title = %dto.title, "Creating new course");

        // The college must exist and be active before a course can hang off it.
        let college_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM colleges WHERE id = $1 AND is_active = TRUE)",
        )
        .bind(dto.college_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error checking college");
            AppError::from(e)
        })?;

        if !college_exists {
            return Err(AppError::not_found(anyhow::anyhow!("College not found")));
        }

        let query = format!(
            "INSERT INTO courses \
             (college_id, title, category, level, description, thumbnail_url, duration_hours, \
              expected_completion_days, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            COURSE_COLUMNS
        );

        let course = sqlx::query_as::<_, Course>(&query)
            .bind(dto.college_id)
            .bind(&dto.title)
            .bind(&dto.category)
            .bind(&dto.level)
            .bind(&dto.description)
            .bind(&dto.thumbnail_url)
            .bind(dto.duration_hours)
            .bind(dto.expected_completion_days)
            .bind(dto.is_published)
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error creating course");
                AppError::from(e)
            })?;

        info!(course.id = %course.id, course.title = %course.title, "Course created successfully");

        Ok(course)
    }

    /// Lists active courses, newest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn list_courses(db: &PgPool) -> Result<Vec<Course>, AppError> {
        let query = format!(
            "SELECT {} FROM courses WHERE is_active = TRUE ORDER BY created_at DESC",
            COURSE_COLUMNS
        );

        sqlx::query_as::<_, Course>(&query)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error listing courses");
                AppError::from(e)
            })
    }

    #[instrument(skip(db), fields(course.id = %course_id, db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_course(db: &PgPool, course_id: i64) -> Result<Course, AppError> {
        let query = format!("SELECT {} FROM courses WHERE id = $1", COURSE_COLUMNS);

        sqlx::query_as::<_, Course>(&query)
            .bind(course_id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching course");
                AppError::from(e)
            })?
            .ok_or_else(|| {
                debug!(course.id = %course_id, "Course not found");
                AppError::not_found(anyhow::anyhow!("Course not found"))
            })
    }

    #[instrument(skip(db, dto), fields(course.id = %course_id, db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update_course(
        db: &PgPool,
        course_id: i64,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        Self::get_course(db, course_id).await?;

        let query = format!(
            "UPDATE courses SET \
             title = COALESCE($2, title), \
             category = COALESCE($3, category), \
             level = COALESCE($4, level), \
             description = COALESCE($5, description), \
             thumbnail_url = COALESCE($6, thumbnail_url), \
             duration_hours = COALESCE($7, duration_hours), \
             expected_completion_days = COALESCE($8, expected_completion_days), \
             is_published = COALESCE($9, is_published), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {}",
            COURSE_COLUMNS
        );

        let course = sqlx::query_as::<_, Course>(&query)
            .bind(course_id)
            .bind(&dto.title)
            .bind(&dto.category)
            .bind(&dto.level)
            .bind(&dto.description)
            .bind(&dto.thumbnail_url)
            .bind(dto.duration_hours)
            .bind(dto.expected_completion_days)
            .bind(dto.is_published)
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error updating course");
                AppError::from(e)
            })?;

        info!(course.id = %course_id, "Course updated successfully");

        Ok(course)
    }

    /// Soft-deletes a course. Missing or already-inactive rows are 404.
    #[instrument(skip(db), fields(course.id = %course_id, db.operation = "UPDATE", db.table = "courses"))]
    pub async fn delete_course(db: &PgPool, course_id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE courses SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(course_id)
        .execute(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error deleting course");
            AppError::from(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        info!(course.id = %course_id, "Course soft-deleted");

        Ok(())
    }
}
