use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info_span;

use crate::db::SqliteCourseRepository;
use crate::services::CourseService;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub courses: Arc<CourseService>,
    pub default_page_limit: i64,
}

impl AppState {
    pub fn new(db: SqlitePool, default_page_limit: i64) -> Self {
        let span = info_span!("courses");
        let repo = Arc::new(SqliteCourseRepository::new(db.clone(), span.clone()));
        let courses = CourseService::new(repo, span);
        Self {
            db,
            courses: Arc::new(courses),
            default_page_limit,
        }
    }
}
