use cartelera_model::MovieId;

/// Errors surfaced by the catalog store.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No record exists under the given id.
    #[error("movie {0} not found")]
    NotFound(MovieId),

    /// The catalog snapshot could not be written to disk. The in-memory
    /// mutation that triggered the save has been rolled back.
    #[error("failed to persist catalog: {0}")]
    Persistence(#[from] std::io::Error),
}

/// Convenience alias for store results.
pub type Result<T> = std::result::Result<T, CatalogError>;
