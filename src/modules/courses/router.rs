use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::course_files::router::init_course_files_router;
use crate::state::AppState;

use super::controller::{create_course, delete_course, get_course, list_courses, update_course};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(list_courses))
        // Single param name across sibling routes; the router requires it
        // and the files subtree reuses it.
        .route(
            "/{course_id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
        .nest("/{course_id}/files", init_course_files_router())
}
