//! User handlers
//!
//! ```text
//! GET  /users      -> 200 [User]
//! GET  /user/:id   -> 200 User | 404 | 500
//! POST /users      -> 200 User (with server-assigned id) | 400 | 500
//! ```
//!
//! Every failure path returns immediately, so each request yields exactly
//! one response.

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::{debug, error, info, warn};
use userbase_core::{to_storage, to_wire, User, UserbaseError};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let records = state.users.list_all().await.map_err(|e| {
        error!("Failed to list users: {}", e);
        ApiError::internal("Failed to get users")
    })?;

    debug!("Listing {} users", records.len());
    Ok(Json(records.into_iter().map(to_wire).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    match state.users.get_by_identifier(&id).await {
        Ok(record) => Ok(Json(to_wire(record))),
        Err(e @ UserbaseError::NotFound(_)) => {
            debug!("{}", e);
            Err(e.into())
        }
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(ApiError::internal(format!(
                "Failed to get user with id: {}",
                id
            )))
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(user) = payload.map_err(|rejection| {
        warn!("Rejected create request: {}", rejection.body_text());
        ApiError::from(UserbaseError::Decode(rejection.body_text()))
    })?;

    let record = to_storage(user);
    let stored = match state.users.insert(record).await {
        Ok(stored) => stored,
        Err(e) => {
            error!("Failed to create user: {}", e);
            return Err(ApiError::internal("Failed to create new user"));
        }
    };

    info!("Created user {}", stored.identifier);
    Ok(Json(to_wire(stored)))
}
