use axum::{Json, extract::Path, extract::State, http::StatusCode};
use validator::Validate;

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{College, CollegeCoursesResponse, CreateCollegeDto, UpdateCollegeDto};
use super::service::CollegeService;

#[utoipa::path(
    post,
    path = "/api/admin/colleges",
    request_body = CreateCollegeDto,
    responses(
        (status = 201, description = "College created successfully", body = College),
        (status = 400, description = "Validation failure or duplicate code"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Colleges",
    security(("bearer_auth" = []))
)]
pub async fn create_college(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(dto): Json<CreateCollegeDto>,
) -> Result<(StatusCode, Json<College>), AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let college = CollegeService::create_college(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(college)))
}

#[utoipa::path(
    get,
    path = "/api/admin/colleges",
    responses(
        (status = 200, description = "Active colleges, newest first", body = [College]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Colleges",
    security(("bearer_auth" = []))
)]
pub async fn list_colleges(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<College>>, AppError> {
    let colleges = CollegeService::list_colleges(&state.db).await?;
    Ok(Json(colleges))
}

#[utoipa::path(
    get,
    path = "/api/admin/colleges/{id}",
    params(("id" = i64, Path, description = "College ID")),
    responses(
        (status = 200, description = "College details", body = College),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "College not found")
    ),
    tag = "Colleges",
    security(("bearer_auth" = []))
)]
pub async fn get_college(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<College>, AppError> {
    let college = CollegeService::get_college(&state.db, id).await?;
    Ok(Json(college))
}

#[utoipa::path(
    patch,
    path = "/api/admin/colleges/{id}",
    params(("id" = i64, Path, description = "College ID")),
    request_body = UpdateCollegeDto,
    responses(
        (status = 200, description = "Updated college", body = College),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "College not found")
    ),
    tag = "Colleges",
    security(("bearer_auth" = []))
)]
pub async fn update_college(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateCollegeDto>,
) -> Result<Json<College>, AppError> {
    dto.validate().map_err(AppError::bad_request)?;

    let college = CollegeService::update_college(&state.db, id, dto).await?;
    Ok(Json(college))
}

#[utoipa::path(
    delete,
    path = "/api/admin/colleges/{id}",
    params(("id" = i64, Path, description = "College ID")),
    responses(
        (status = 204, description = "College deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "College not found")
    ),
    tag = "Colleges",
    security(("bearer_auth" = []))
)]
pub async fn delete_college(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    CollegeService::delete_college(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/admin/colleges/{id}/courses",
    params(("id" = i64, Path, description = "College ID")),
    responses(
        (status = 200, description = "Published courses for the college", body = CollegeCoursesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "College not found")
    ),
    tag = "Colleges",
    security(("bearer_auth" = []))
)]
pub async fn get_college_courses(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<CollegeCoursesResponse>, AppError> {
    let response = CollegeService::get_courses_for_college(&state.db, id).await?;
    Ok(Json(response))
}
