use axum::{Json, extract::Path, extract::State, http::StatusCode};
use validator::Validate;

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{Course, CreateCourseDto, UpdateCourseDto};
use super::service::CourseService;

#[utoipa::path(
    post,
    path = "/api/admin/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created successfully", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "College not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn create_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(dto): Json<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let course = CourseService::create_course(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    get,
    path = "/api/admin/courses",
    responses(
        (status = 200, description = "Active courses, newest first", body = [Course]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn list_courses(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_courses(&state.db).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/admin/courses/{course_id}",
    params(("course_id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn get_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course(&state.db, id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    patch,
    path = "/api/admin/courses/{course_id}",
    params(("course_id" = i64, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Updated course", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn update_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/admin/courses/{course_id}",
    params(("course_id" = i64, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn delete_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
