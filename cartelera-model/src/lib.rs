//! Core data model definitions shared across Cartelera crates.

pub mod error;
pub mod genre;
pub mod ids;
pub mod movie;

pub use error::{ValidationError, Violation};
pub use genre::Genre;
pub use ids::MovieId;
pub use movie::{
    CreateMovieRequest, MovieChanges, MovieDraft, MovieRecord,
    UpdateMovieRequest,
};
