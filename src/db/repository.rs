use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{Span, debug, info};

use crate::error::AppError;
use crate::models::{Course, CourseFilter, CoursePatch};

const COURSE_COLUMNS: &str = "id, name, start_date, end_date, created_at, updated_at";

/// Storage for course rows.
///
/// Name filtering matches against `name_lower`, which is always written from
/// `str::to_lowercase` so stored names and search terms fold the same way.
///
/// `update` and `delete` report `AppError::NotFound` when no row matched, which
/// is how a concurrently deleted course surfaces to the service.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: &Course) -> Result<(), AppError>;
    async fn get(&self, id: &str) -> Result<Course, AppError>;
    async fn get_all(
        &self,
        filter: &CourseFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Course>, AppError>;
    async fn count(&self, filter: &CourseFilter) -> Result<i64, AppError>;
    async fn update(&self, id: &str, patch: CoursePatch) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct SqliteCourseRepository {
    db: SqlitePool,
    span: Span,
}

impl SqliteCourseRepository {
    pub fn new(db: SqlitePool, span: Span) -> Self {
        Self { db, span }
    }
}

#[async_trait]
impl CourseRepository for SqliteCourseRepository {
    async fn create(&self, course: &Course) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO courses (id, name, name_lower, start_date, end_date, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&course.id)
        .bind(&course.name)
        .bind(course.name.to_lowercase())
        .bind(course.start_date)
        .bind(course.end_date)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.db)
        .await?;

        self.span
            .in_scope(|| info!("course created with id: {}", course.id));
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Course, AppError> {
        let sql = format!("SELECT {} FROM courses WHERE id = ?", COURSE_COLUMNS);
        sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(id))
    }

    async fn get_all(
        &self,
        filter: &CourseFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Course>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM courses", COURSE_COLUMNS));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC, rowid DESC LIMIT ")
            .push_bind(limit.max(0))
            .push(" OFFSET ")
            .push_bind(offset.max(0));

        self.span.in_scope(|| {
            debug!("listing courses: {:?} offset={} limit={}", filter, offset, limit)
        });
        let courses = qb.build_query_as::<Course>().fetch_all(&self.db).await?;
        Ok(courses)
    }

    async fn count(&self, filter: &CourseFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM courses");
        push_filter(&mut qb, filter);

        let count = qb.build_query_scalar::<i64>().fetch_one(&self.db).await?;
        Ok(count)
    }

    async fn update(&self, id: &str, patch: CoursePatch) -> Result<(), AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE courses SET ");
        let mut set = qb.separated(", ");
        if let Some(name) = patch.name {
            set.push("name_lower = ").push_bind_unseparated(name.to_lowercase());
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(start_date) = patch.start_date {
            set.push("start_date = ").push_bind_unseparated(start_date);
        }
        if let Some(end_date) = patch.end_date {
            set.push("end_date = ").push_bind_unseparated(end_date);
        }
        set.push("updated_at = ").push_bind_unseparated(Utc::now());
        qb.push(" WHERE id = ").push_bind(id);

        let affected = qb.build().execute(&self.db).await?.rows_affected();
        if affected == 0 {
            self.span.in_scope(|| info!("course {} doesn't exist", id));
            return Err(AppError::not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let affected = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?
            .rows_affected();

        if affected == 0 {
            self.span.in_scope(|| info!("course {} doesn't exist", id));
            return Err(AppError::not_found(id));
        }
        Ok(())
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &CourseFilter) {
    if let Some(name) = filter.name.as_deref().filter(|n| !n.is_empty()) {
        let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
        qb.push(" WHERE name_lower LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'");
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
