use axum::{
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use cartelera_model::{
    CreateMovieRequest, MovieId, MovieRecord, UpdateMovieRequest,
};

use crate::api::ApiResponse;
use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;

/// GET /api/v1/movies — the whole catalog plus a total count.
pub async fn list_movies_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<MovieRecord>>>> {
    let catalog = state.catalog.lock().await;
    let movies: Vec<MovieRecord> =
        catalog.list().into_iter().cloned().collect();
    let total = movies.len();

    info!("listing movies, {total} found");
    Ok(Json(
        ApiResponse::success(format!("found {total} movies"), movies)
            .with_total(total),
    ))
}

/// POST /api/v1/movies — validate, assign an id, persist.
pub async fn create_movie_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<MovieRecord>>)> {
    let Json(request) = payload?;
    let draft = request.validate().inspect_err(|err| {
        warn!(error = %err, "rejecting create payload");
    })?;

    let mut catalog = state.catalog.lock().await;
    let record = catalog.create(draft)?;
    info!(id = %record.id, title = %record.title, "created movie");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("movie created", record)),
    ))
}

/// GET /api/v1/movies/{id}
pub async fn get_movie_handler(
    State(state): State<AppState>,
    path: Result<Path<MovieId>, PathRejection>,
) -> AppResult<Json<ApiResponse<MovieRecord>>> {
    let Path(id) = path?;

    let catalog = state.catalog.lock().await;
    match catalog.get(id) {
        Some(record) => Ok(Json(ApiResponse::success(
            format!("movie {id} found"),
            record.clone(),
        ))),
        None => {
            warn!(%id, "movie not found");
            Err(AppError::not_found(format!("movie with id {id} not found")))
        }
    }
}

/// PUT /api/v1/movies/{id} — partial update; only supplied fields change.
pub async fn update_movie_handler(
    State(state): State<AppState>,
    path: Result<Path<MovieId>, PathRejection>,
    payload: Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<MovieRecord>>> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let changes = request.validate().inspect_err(|err| {
        warn!(%id, error = %err, "rejecting update payload");
    })?;

    let mut catalog = state.catalog.lock().await;
    let record = catalog.update(id, changes)?;
    info!(%id, "updated movie");

    Ok(Json(ApiResponse::success(
        format!("movie {id} updated"),
        record,
    )))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete_movie_handler(
    State(state): State<AppState>,
    path: Result<Path<MovieId>, PathRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let Path(id) = path?;

    let mut catalog = state.catalog.lock().await;
    catalog.delete(id)?;
    info!(%id, "deleted movie");

    Ok(Json(ApiResponse::ack(format!("movie {id} deleted"))))
}
