//! Task request handlers.
//!
//! Each handler gets the store and the parsed request, nothing else.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::http::request::RequestContext;
use crate::http::response::ApiError;
use crate::storage::{timestamp, Database, Row, SearchFilter, StoreError};
use crate::tasks::model::{Task, TaskPayload, TABLE};

/// POST /tasks
pub async fn create_task(db: &Database, ctx: &RequestContext) -> Result<Response, ApiError> {
    let fields = TaskPayload::from_body(&ctx.body)
        .validate()
        .ok_or(ApiError::Validation)?;

    let task = Task::new(fields.title, fields.description);
    tracing::info!(id = %task.id, "Creating task");
    let row = task.into_row().map_err(StoreError::from)?;
    db.insert(TABLE, row).await?;

    Ok(StatusCode::CREATED.into_response())
}

/// GET /tasks?search=
pub async fn list_tasks(db: &Database, ctx: &RequestContext) -> Result<Response, ApiError> {
    let filter = ctx.query_value("search").map(|search| {
        SearchFilter::new()
            .field("title", search)
            .field("description", search)
    });

    let rows = db.select(TABLE, filter.as_ref()).await;
    Ok(Json(rows).into_response())
}

/// PUT /tasks/:id
pub async fn update_task(db: &Database, ctx: &RequestContext) -> Result<Response, ApiError> {
    let id = ctx.param("id").ok_or(ApiError::NotFound)?;
    let fields = TaskPayload::from_body(&ctx.body)
        .validate()
        .ok_or(ApiError::Validation)?;

    let mut changes = Row::new();
    changes.insert("title".into(), Value::String(fields.title));
    changes.insert("description".into(), Value::String(fields.description));
    changes.insert("updated_at".into(), Value::String(timestamp()));

    if !db.update(TABLE, id, changes).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// DELETE /tasks/:id
pub async fn delete_task(db: &Database, ctx: &RequestContext) -> Result<Response, ApiError> {
    let id = ctx.param("id").ok_or(ApiError::NotFound)?;
    if !db.delete(TABLE, id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// PATCH /tasks/:id/complete
pub async fn complete_task(db: &Database, ctx: &RequestContext) -> Result<Response, ApiError> {
    let id = ctx.param("id").ok_or(ApiError::NotFound)?;
    if !db.complete(TABLE, id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}
