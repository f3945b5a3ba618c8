use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::error::AppError;
use crate::models::*;
use crate::pagination::PageMeta;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(
    State(state): State<AppState>,
    query: Result<Query<ListCoursesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Course>>>, AppError> {
    let Query(params) = query.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let filter = CourseFilter::by_name(params.name);

    let total = state.courses.count(&filter).await?;
    let meta = PageMeta::new(params.page, params.limit, total, state.default_page_limit)?;
    let courses = state
        .courses
        .get_all(&filter, meta.offset(), meta.limit())
        .await?;

    Ok(Json(ApiResponse::page(courses, meta)))
}

async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let course = state.courses.create(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::created(course))))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = state.courses.get(&id).await?;
    Ok(Json(ApiResponse::ok(course)))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    state.courses.update(&id, req).await?;
    Ok(Json(ApiResponse::empty()))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.courses.delete(&id).await?;
    Ok(Json(ApiResponse::empty()))
}
