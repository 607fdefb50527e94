use axum::{middleware, routing::get, Extension, Router};
use std::sync::Arc;

use crate::controllers;
use crate::telemetry::log_requests;
use crate::{health_with_pool, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|Extension(state): Extension<Arc<AppState>>| async move {
            health_with_pool(&state.pool).await
        }))
        .route("/messages", get(controllers::list).post(controllers::register))
        .route(
            "/messages/:id",
            get(controllers::find)
                .put(controllers::alter)
                .delete(controllers::remove),
        )
        .layer(middleware::from_fn(log_requests))
        .layer(Extension(state))
}
