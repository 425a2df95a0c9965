use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{list_course_files, upload_course_file};

pub fn init_course_files_router() -> Router<AppState> {
    Router::new().route("/", post(upload_course_file).get(list_course_files))
}
