use std::sync::Arc;

use chrono::Utc;
use tracing::{Span, debug, warn};
use uuid::Uuid;

use crate::db::CourseRepository;
use crate::error::{AppError, Field};
use crate::models::{Course, CourseFilter, CoursePatch, CreateCourseRequest, UpdateCourseRequest};
use crate::validation::{self, ValidCourse};

/// Validates course input and drives the repository.
///
/// Log events are recorded inside `span`, which the owner hands in at
/// construction.
pub struct CourseService {
    repo: Arc<dyn CourseRepository>,
    span: Span,
}

impl CourseService {
    pub fn new(repo: Arc<dyn CourseRepository>, span: Span) -> Self {
        Self { repo, span }
    }

    pub async fn create(&self, req: CreateCourseRequest) -> Result<Course, AppError> {
        let ValidCourse {
            name,
            start_date,
            end_date,
        } = validation::validate_create(req).inspect_err(|e| self.reject("create", e))?;

        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4().to_string(),
            name,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&course).await?;
        Ok(course)
    }

    pub async fn get(&self, id: &str) -> Result<Course, AppError> {
        self.repo.get(id).await
    }

    pub async fn get_all(
        &self,
        filter: &CourseFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Course>, AppError> {
        self.repo.get_all(filter, offset, limit).await
    }

    pub async fn count(&self, filter: &CourseFilter) -> Result<i64, AppError> {
        self.repo.count(filter).await
    }

    pub async fn update(&self, id: &str, req: UpdateCourseRequest) -> Result<(), AppError> {
        validation::require_supplied(&req).inspect_err(|e| self.reject("update", e))?;

        let current = self.repo.get(id).await?;

        let start_date = validation::parse_date_update(Field::StartDate, &req.start_date)
            .inspect_err(|e| self.reject("update", e))?;
        let end_date = validation::parse_date_update(Field::EndDate, &req.end_date)
            .inspect_err(|e| self.reject("update", e))?;

        if start_date.is_some() || end_date.is_some() {
            validation::ensure_range(
                start_date.unwrap_or(current.start_date),
                end_date.unwrap_or(current.end_date),
            )
            .inspect_err(|e| self.reject("update", e))?;
        }

        let patch = CoursePatch {
            name: req.name.as_set().cloned(),
            start_date,
            end_date,
        };
        if patch.is_empty() {
            self.span
                .in_scope(|| debug!("update of course {} carried no fields", id));
            return Ok(());
        }

        self.repo.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repo.delete(id).await
    }

    fn reject(&self, op: &str, err: &AppError) {
        self.span
            .in_scope(|| warn!("course {} rejected: {}", op, err));
    }
}
