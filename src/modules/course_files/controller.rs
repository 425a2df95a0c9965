use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{CourseFile, CourseFileUpload};
use super::service::CourseFileService;

#[utoipa::path(
    post,
    path = "/api/admin/courses/{course_id}/files",
    params(("course_id" = i64, Path, description = "Course ID")),
    responses(
        (status = 201, description = "File uploaded and recorded", body = CourseFile),
        (status = 400, description = "Missing file part or oversized upload"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Course Files",
    security(("bearer_auth" = []))
)]
pub async fn upload_course_file(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CourseFile>), AppError> {
    let upload = parse_upload(multipart).await?;

    let course_file =
        CourseFileService::upload_course_file(&state.db, state.storage.as_ref(), course_id, upload)
            .await?;

    Ok((StatusCode::CREATED, Json(course_file)))
}

#[utoipa::path(
    get,
    path = "/api/admin/courses/{course_id}/files",
    params(("course_id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Files for the course, newest first", body = [CourseFile]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Course Files",
    security(("bearer_auth" = []))
)]
pub async fn list_course_files(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<i64>,
) -> Result<Json<Vec<CourseFile>>, AppError> {
    let files = CourseFileService::list_course_files(&state.db, course_id).await?;
    Ok(Json(files))
}

/// Pulls the upload out of the multipart body.
///
/// Expected parts: `file` (required), `file_title`, `file_description`,
/// `duration_seconds`. Unknown parts are ignored.
async fn parse_upload(mut multipart: Multipart) -> Result<CourseFileUpload, AppError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut file_title = None;
    let mut file_description = None;
    let mut duration_seconds = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Malformed multipart body: {}", e)))?
    {
        // Owned copy: reading the field content consumes it.
        let name = field.name().map(str::to_string);

        match name.as_deref() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("File part has no filename")))?;
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let content = field.bytes().await.map_err(|e| {
                    AppError::bad_request(anyhow::anyhow!("Failed to read file part: {}", e))
                })?;

                file = Some((file_name, mime_type, content.to_vec()));
            }
            Some("file_title") => {
                file_title = Some(read_text(field).await?);
            }
            Some("file_description") => {
                file_description = Some(read_text(field).await?);
            }
            Some("duration_seconds") => {
                let raw = read_text(field).await?;
                duration_seconds = Some(raw.parse::<i32>().map_err(|_| {
                    AppError::bad_request(anyhow::anyhow!("duration_seconds must be an integer"))
                })?);
            }
            _ => {}
        }
    }

    let (file_name, mime_type, content) = file
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Missing 'file' part in upload")))?;

    Ok(CourseFileUpload {
        file_name,
        mime_type,
        content,
        file_title,
        file_description,
        duration_seconds,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Malformed multipart field: {}", e)))
}
