use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::modules::courses::service::CourseService;
use crate::utils::errors::AppError;
use crate::utils::file_storage::{FileStorage, StorageError};

use super::model::{CourseFile, CourseFileUpload, FileType};

const COURSE_FILE_COLUMNS: &str =
    "id, course_id, file_name, file_title, file_description, duration_seconds, file_type, \
     file_size, mime_type, file_url, is_published, download_allowed, created_at";

pub struct CourseFileService;

impl CourseFileService {
    /// Stores an upload and records its bookkeeping row.
    ///
    /// The course must exist (404 otherwise). Bytes go through the storage
    /// backend first; the row is only written once storage succeeded, so a
    /// failed upload never leaves a dangling record.
    #[instrument(
        skip(db, storage, upload),
        fields(course.id = %course_id, file.name = %upload.file_name, db.operation = "INSERT", db.table = "course_files")
    )]
    pub async fn upload_course_file(
        db: &PgPool,
        storage: &dyn FileStorage,
        course_id: i64,
        upload: CourseFileUpload,
    ) -> Result<CourseFile, AppError> {
        CourseService::get_course(db, course_id).await?;

        let key = format!(
            "courses/{}/{}.{}",
            course_id,
            Uuid::new_v4(),
            extension_for(&upload.file_name)
        );

        let file_size = upload.content.len() as i64;

        let stored_key = storage
            .save(&key, &upload.content)
            .await
            .map_err(storage_error)?;
        let file_url = storage.get_url(&stored_key).map_err(storage_error)?;

        let file_type = FileType::from_mime(&upload.mime_type);
        let file_title = upload
            .file_title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| upload.file_name.clone());

        let query = format!(
            "INSERT INTO course_files \
             (course_id, file_name, file_title, file_description, duration_seconds, file_type, \
              file_size, mime_type, file_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            COURSE_FILE_COLUMNS
        );

        let course_file = sqlx::query_as::<_, CourseFile>(&query)
            .bind(course_id)
            .bind(&upload.file_name)
            .bind(&file_title)
            .bind(&upload.file_description)
            .bind(upload.duration_seconds)
            .bind(file_type.as_str())
            .bind(file_size)
            .bind(&upload.mime_type)
            .bind(&file_url)
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error recording course file");
                AppError::from(e)
            })?;

        info!(
            file.id = %course_file.id,
            file.type = %course_file.file_type,
            file.size = %course_file.file_size,
            "Course file uploaded"
        );

        Ok(course_file)
    }

    /// Lists files for a course, newest first.
    #[instrument(skip(db), fields(course.id = %course_id, db.operation = "SELECT", db.table = "course_files"))]
    pub async fn list_course_files(
        db: &PgPool,
        course_id: i64,
    ) -> Result<Vec<CourseFile>, AppError> {
        CourseService::get_course(db, course_id).await?;

        let query = format!(
            "SELECT {} FROM course_files WHERE course_id = $1 ORDER BY created_at DESC",
            COURSE_FILE_COLUMNS
        );

        let files = sqlx::query_as::<_, CourseFile>(&query)
            .bind(course_id)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error listing course files");
                AppError::from(e)
            })?;

        debug!(count = %files.len(), "Course files fetched");

        Ok(files)
    }
}

/// Extension from the original filename, lowercased; `bin` when absent.
fn extension_for(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

fn storage_error(err: StorageError) -> AppError {
    match err {
        StorageError::FileTooLarge { .. } => AppError::bad_request(err),
        _ => {
            error!(error = %err, "Storage backend failure");
            AppError::internal(err)
        }
    }
}
