use cartelera_model::MovieRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// On-disk layout of the catalog file:
/// `{"movies": [...], "next_id": N}`.
#[derive(Debug, Serialize)]
pub(crate) struct Snapshot<'a> {
    pub movies: Vec<&'a MovieRecord>,
    pub next_id: u64,
}

/// Leniently parsed form of the catalog file.
///
/// Movie entries stay raw JSON here so one corrupt entry cannot poison the
/// rest of the document; `next_id` likewise tolerates a wrong type.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSnapshot {
    #[serde(default)]
    pub movies: Vec<Value>,
    #[serde(default)]
    pub next_id: Value,
}

impl RawSnapshot {
    /// The stored counter, when it is a positive integer.
    pub fn valid_next_id(&self) -> Option<u64> {
        self.next_id.as_u64().filter(|&id| id > 0)
    }
}

/// Decode the entries that parse as movie records; drop the rest.
pub(crate) fn salvage_movies(entries: Vec<Value>) -> Vec<MovieRecord> {
    let mut movies = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<MovieRecord>(entry) {
            Ok(movie) => movies.push(movie),
            Err(err) => {
                warn!(error = %err, "dropping unreadable movie entry")
            }
        }
    }
    movies
}
