use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::handlers::movie_handlers::{
    create_movie_handler, delete_movie_handler, get_movie_handler,
    list_movies_handler, update_movie_handler,
};
use crate::infra::app_state::AppState;

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/movies",
            get(list_movies_handler).post(create_movie_handler),
        )
        .route("/movies/{id}", get(get_movie_handler))
        .route("/movies/{id}", put(update_movie_handler))
        .route("/movies/{id}", delete(delete_movie_handler))
}
