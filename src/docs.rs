use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::colleges::model::{
    College, CollegeCoursesResponse, CourseSummary, CreateCollegeDto, UpdateCollegeDto,
};
use crate::modules::course_files::model::CourseFile;
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::colleges::controller::create_college,
        crate::modules::colleges::controller::list_colleges,
        crate::modules::colleges::controller::get_college,
        crate::modules::colleges::controller::update_college,
        crate::modules::colleges::controller::delete_college,
        crate::modules::colleges::controller::get_college_courses,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::course_files::controller::upload_course_file,
        crate::modules::course_files::controller::list_course_files,
    ),
    components(
        schemas(
            College,
            CreateCollegeDto,
            UpdateCollegeDto,
            CollegeCoursesResponse,
            CourseSummary,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            CourseFile,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Colleges", description = "College administration"),
        (name = "Courses", description = "Course administration"),
        (name = "Course Files", description = "Course file uploads and listing"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
