use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use crate::utils::errors::AppError;

use super::model::{
    College, CollegeCoursesResponse, CourseSummary, CreateCollegeDto, UpdateCollegeDto,
};

const COLLEGE_COLUMNS: &str = "id, name, code, description, email, phone, website, city, state, \
                               country, established_year, is_active, created_at, updated_at";

pub struct CollegeService;

impl CollegeService {
    #[instrument(skip(db, dto), fields(college.code = %dto.code, db.operation = "INSERT", db.table = "colleges"))]
    pub async fn create_college(db: &PgPool, dto: CreateCollegeDto) -> Result<College, AppError> {
        debug!(college.name = %dto.name, "Creating new college");

        let query = format!(
            "INSERT INTO colleges \
             (name, code, description, email, phone, website, city, state, country, established_year) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {}",
            COLLEGE_COLUMNS
        );

        let college = sqlx::query_as::<_, College>(&query)
            .bind(&dto.name)
            .bind(&dto.code)
            .bind(&dto.description)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.website)
            .bind(&dto.city)
            .bind(&dto.state)
            .bind(&dto.country)
            .bind(dto.established_year)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    warn!(college.code = %dto.code, "Attempted to create college with existing code");
                    return AppError::bad_request(anyhow::anyhow!(
                        "College with this code already exists"
                    ));
                }
                error!(error = %e, "Database error creating college");
                AppError::from(e)
            })?;

        info!(college.id = %college.id, college.code = %college.code, "College created successfully");

        Ok(college)
    }

    /// Lists active colleges, newest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "colleges"))]
    pub async fn list_colleges(db: &PgPool) -> Result<Vec<College>, AppError> {
        let query = format!(
            "SELECT {} FROM colleges WHERE is_active = TRUE ORDER BY created_at DESC",
            COLLEGE_COLUMNS
        );

        let colleges = sqlx::query_as::<_, College>(&query)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error listing colleges");
                AppError::from(e)
            })?;

        debug!(count = %colleges.len(), "Colleges fetched");

        Ok(colleges)
    }

    /// Fetches a college by id, active or inactive (admin view).
    #[instrument(skip(db), fields(college.id = %college_id, db.operation = "SELECT", db.table = "colleges"))]
    pub async fn get_college(db: &PgPool, college_id: i64) -> Result<College, AppError> {
        let query = format!("SELECT {} FROM colleges WHERE id = $1", COLLEGE_COLUMNS);

        sqlx::query_as::<_, College>(&query)
            .bind(college_id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching college");
                AppError::from(e)
            })?
            .ok_or_else(|| {
                debug!(college.id = %college_id, "College not found");
                AppError::not_found(anyhow::anyhow!("College not found"))
            })
    }

    #[instrument(skip(db, dto), fields(college.id = %college_id, db.operation = "UPDATE", db.table = "colleges"))]
    pub async fn update_college(
        db: &PgPool,
        college_id: i64,
        dto: UpdateCollegeDto,
    ) -> Result<College, AppError> {
        // Existence check first so a missing row is a 404, not a silent no-op.
        Self::get_college(db, college_id).await?;

        let query = format!(
            "UPDATE colleges SET \
             name = COALESCE($2, name), \
             description = COALESCE($3, description), \
             email = COALESCE($4, email), \
             phone = COALESCE($5, phone), \
             website = COALESCE($6, website), \
             city = COALESCE($7, city), \
             state = COALESCE($8, state), \
             country = COALESCE($9, country), \
             established_year = COALESCE($10, established_year), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {}",
            COLLEGE_COLUMNS
        );

        let college = sqlx::query_as::<_, College>(&query)
            .bind(college_id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.website)
            .bind(&dto.city)
            .bind(&dto.state)
            .bind(&dto.country)
            .bind(dto.established_year)
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error updating college");
                AppError::from(e)
            })?;

        info!(college.id = %college_id, "College updated successfully");

        Ok(college)
    }

    /// Soft-deletes a college. Missing or already-inactive rows are 404.
    #[instrument(skip(db), fields(college.id = %college_id, db.operation = "UPDATE", db.table = "colleges"))]
    pub async fn delete_college(db: &PgPool, college_id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE colleges SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(college_id)
        .execute(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error deleting college");
            AppError::from(e)
        })?;

        if result.rows_affected() == 0 {
            debug!(college.id = %college_id, "College not found or already inactive");
            return Err(AppError::not_found(anyhow::anyhow!("College not found")));
        }

        info!(college.id = %college_id, "College soft-deleted");

        Ok(())
    }

    /// Published, active courses for a college, shaped for the admin report.
    #[instrument(skip(db), fields(college.id = %college_id, db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_courses_for_college(
        db: &PgPool,
        college_id: i64,
    ) -> Result<CollegeCoursesResponse, AppError> {
        Self::get_college(db, college_id).await?;

        let courses = sqlx::query_as::<_, CourseSummary>(
            "SELECT id AS course_id, title, category, level, description, thumbnail_url, \
                    duration_hours, expected_completion_days, created_at \
             FROM courses \
             WHERE college_id = $1 AND is_active = TRUE AND is_published = TRUE \
             ORDER BY created_at DESC",
        )
        .bind(college_id)
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching courses for college");
            AppError::from(e)
        })?;

        Ok(CollegeCoursesResponse {
            college_id,
            total_courses: courses.len(),
            courses,
        })
    }
}
