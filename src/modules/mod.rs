pub mod colleges;
pub mod course_files;
pub mod courses;

pub use self::colleges::model::College;
pub use self::course_files::model::CourseFile;
pub use self::courses::model::Course;
