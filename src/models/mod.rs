pub mod course;
pub mod response;

pub use course::{
    Course, CourseFilter, CoursePatch, CreateCourseRequest, FieldUpdate, ListCoursesQuery,
    UpdateCourseRequest,
};
pub use response::ApiResponse;
