use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_college, delete_college, get_college, get_college_courses, list_colleges,
    update_college,
};

pub fn init_colleges_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_college).get(list_colleges))
        .route(
            "/{id}",
            get(get_college).patch(update_college).delete(delete_college),
        )
        .route("/{id}/courses", get(get_college_courses))
}
