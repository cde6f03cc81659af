//! Task route table.

use axum::http::Method;
use axum::response::Response;

use crate::http::request::RequestContext;
use crate::http::response::ApiError;
use crate::routing::{PatternError, Router};
use crate::storage::Database;
use crate::tasks::handlers;

/// Which handler a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CreateTask,
    ListTasks,
    UpdateTask,
    DeleteTask,
    CompleteTask,
}

impl Endpoint {
    /// Route name for logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::CreateTask => "create_task",
            Endpoint::ListTasks => "list_tasks",
            Endpoint::UpdateTask => "update_task",
            Endpoint::DeleteTask => "delete_task",
            Endpoint::CompleteTask => "complete_task",
        }
    }

    pub async fn call(self, db: &Database, ctx: &RequestContext) -> Result<Response, ApiError> {
        match self {
            Endpoint::CreateTask => handlers::create_task(db, ctx).await,
            Endpoint::ListTasks => handlers::list_tasks(db, ctx).await,
            Endpoint::UpdateTask => handlers::update_task(db, ctx).await,
            Endpoint::DeleteTask => handlers::delete_task(db, ctx).await,
            Endpoint::CompleteTask => handlers::complete_task(db, ctx).await,
        }
    }
}

/// Task routes, most specific first.
pub fn task_routes() -> Result<Router<Endpoint>, PatternError> {
    Router::new()
        .route(Method::POST, "/tasks", Endpoint::CreateTask)?
        .route(Method::GET, "/tasks", Endpoint::ListTasks)?
        .route(Method::PATCH, "/tasks/:id/complete", Endpoint::CompleteTask)?
        .route(Method::PUT, "/tasks/:id", Endpoint::UpdateTask)?
        .route(Method::DELETE, "/tasks/:id", Endpoint::DeleteTask)
}
