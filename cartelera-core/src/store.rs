use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cartelera_model::{MovieChanges, MovieDraft, MovieId, MovieRecord};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{CatalogError, Result};
use crate::snapshot::{RawSnapshot, Snapshot, salvage_movies};

/// File-backed catalog of movie records.
///
/// The whole catalog is held in memory; every mutation rewrites the backing
/// JSON file before returning, and a failed write rolls the mutation back.
/// The store itself carries no locking — hosts serving concurrent requests
/// must wrap it in a mutual-exclusion boundary so that each
/// read-modify-write-persist cycle runs as one critical section.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    movies: BTreeMap<MovieId, MovieRecord>,
    next_id: u64,
}

impl CatalogStore {
    /// Open the catalog at `path`, creating a well-formed empty file when
    /// none exists.
    ///
    /// Unreadable or malformed state is not fatal: the store falls back to
    /// an empty catalog (counter reset to 1) and immediately overwrites the
    /// file with that empty state. Only a failure to write the file itself
    /// is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self {
            path: path.into(),
            movies: BTreeMap::new(),
            next_id: 1,
        };
        store.load()?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a validated draft as a new record, assigning the next id.
    pub fn create(&mut self, draft: MovieDraft) -> Result<MovieRecord> {
        let id = MovieId::new(self.next_id);
        let record = MovieRecord::from_draft(id, draft);
        self.movies.insert(id, record.clone());
        self.next_id += 1;
        if let Err(err) = self.save() {
            self.movies.remove(&id);
            self.next_id -= 1;
            return Err(err);
        }
        Ok(record)
    }

    /// Look up a record by id.
    pub fn get(&self, id: MovieId) -> Option<&MovieRecord> {
        self.movies.get(&id)
    }

    /// All records, in id order. Stable across reloads.
    pub fn list(&self) -> Vec<&MovieRecord> {
        self.movies.values().collect()
    }

    /// Number of records in the catalog.
    pub fn total(&self) -> usize {
        self.movies.len()
    }

    /// Merge validated changes into the record under `id`.
    pub fn update(
        &mut self,
        id: MovieId,
        changes: MovieChanges,
    ) -> Result<MovieRecord> {
        let Some(current) = self.movies.get(&id) else {
            return Err(CatalogError::NotFound(id));
        };
        let previous = current.clone();
        let mut merged = previous.clone();
        merged.apply(changes);
        self.movies.insert(id, merged.clone());
        if let Err(err) = self.save() {
            self.movies.insert(id, previous);
            return Err(err);
        }
        Ok(merged)
    }

    /// Remove the record under `id`. The id is never handed out again.
    pub fn delete(&mut self, id: MovieId) -> Result<()> {
        let Some(removed) = self.movies.remove(&id) else {
            return Err(CatalogError::NotFound(id));
        };
        if let Err(err) = self.save() {
            self.movies.insert(id, removed);
            return Err(err);
        }
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    path = %self.path.display(),
                    "catalog file missing, starting empty"
                );
                return self.save();
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to read catalog file, starting empty"
                );
                return self.save();
            }
        };

        if text.trim().is_empty() {
            return self.save();
        }

        let raw: RawSnapshot = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "malformed catalog file, starting empty"
                );
                return self.save();
            }
        };

        let stored_next_id = raw.valid_next_id();
        self.movies = salvage_movies(raw.movies)
            .into_iter()
            .map(|movie| (movie.id, movie))
            .collect();
        self.next_id = stored_next_id.unwrap_or_else(|| {
            self.movies
                .keys()
                .next_back()
                .map(|id| id.get() + 1)
                .unwrap_or(1)
        });
        Ok(())
    }

    /// Write the full catalog snapshot, temp-file-then-rename so a crash
    /// mid-write cannot truncate the existing file.
    fn save(&self) -> Result<()> {
        let snapshot = Snapshot {
            movies: self.movies.values().collect(),
            next_id: self.next_id,
        };
        let body = serde_json::to_string_pretty(&snapshot).map_err(|err| {
            CatalogError::Persistence(io::Error::new(
                io::ErrorKind::InvalidData,
                err,
            ))
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(body.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|err| CatalogError::Persistence(err.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartelera_model::Genre;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn draft(title: &str) -> MovieDraft {
        MovieDraft {
            title: title.to_string(),
            director: "Denis Villeneuve".to_string(),
            year: Some(2021),
            genre: Genre::CienciaFiccion,
            duration: Some(155),
            rating: None,
            description: None,
            price: None,
            is_watched: false,
        }
    }

    fn catalog_path(dir: &TempDir) -> PathBuf {
        dir.path().join("movies.json")
    }

    fn read_file(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn open_creates_canonical_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = catalog_path(&dir);
        let store = CatalogStore::open(&path).unwrap();

        assert_eq!(store.total(), 0);
        assert_eq!(read_file(&path), json!({ "movies": [], "next_id": 1 }));
    }

    #[test]
    fn empty_file_is_treated_as_fresh_catalog() {
        let dir = TempDir::new().unwrap();
        let path = catalog_path(&dir);
        fs::write(&path, "  \n").unwrap();

        let store = CatalogStore::open(&path).unwrap();
        assert_eq!(store.total(), 0);
        assert_eq!(read_file(&path), json!({ "movies": [], "next_id": 1 }));
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let dir = TempDir::new().unwrap();
        let mut store = CatalogStore::open(catalog_path(&dir)).unwrap();

        let first = store.create(draft("Dune")).unwrap();
        let second = store.create(draft("Arrival")).unwrap();
        assert_eq!(first.id, MovieId::new(1));
        assert_eq!(second.id, MovieId::new(2));

        store.delete(second.id).unwrap();
        let third = store.create(draft("Sicario")).unwrap();
        assert_eq!(third.id, MovieId::new(3));
    }

    #[test]
    fn reload_round_trips_records_and_counter() {
        let dir = TempDir::new().unwrap();
        let path = catalog_path(&dir);

        let mut store = CatalogStore::open(&path).unwrap();
        let dune = store.create(draft("Dune")).unwrap();
        let arrival = store.create(draft("Arrival")).unwrap();
        store.delete(arrival.id).unwrap();
        drop(store);

        let mut reloaded = CatalogStore::open(&path).unwrap();
        assert_eq!(reloaded.total(), 1);
        assert_eq!(reloaded.get(dune.id), Some(&dune));

        // The counter survives the reload: id 2 stays burned.
        let next = reloaded.create(draft("Sicario")).unwrap();
        assert_eq!(next.id, MovieId::new(3));
    }

    #[test]
    fn list_is_id_ordered_and_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = CatalogStore::open(catalog_path(&dir)).unwrap();
        store.create(draft("Dune")).unwrap();
        store.create(draft("Arrival")).unwrap();

        let ids: Vec<MovieId> =
            store.list().iter().map(|movie| movie.id).collect();
        assert_eq!(ids, vec![MovieId::new(1), MovieId::new(2)]);
        assert_eq!(store.list(), store.list());
        assert_eq!(store.get(MovieId::new(1)), store.get(MovieId::new(1)));
    }

    #[test]
    fn update_merges_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = catalog_path(&dir);
        let mut store = CatalogStore::open(&path).unwrap();
        let created = store.create(draft("Dune")).unwrap();

        let updated = store
            .update(
                created.id,
                MovieChanges {
                    is_watched: Some(true),
                    ..MovieChanges::default()
                },
            )
            .unwrap();
        assert!(updated.is_watched);
        assert_eq!(updated.title, created.title);

        let reloaded = CatalogStore::open(&path).unwrap();
        assert_eq!(reloaded.get(created.id), Some(&updated));
    }

    #[test]
    fn empty_update_leaves_record_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut store = CatalogStore::open(catalog_path(&dir)).unwrap();
        let created = store.create(draft("Dune")).unwrap();

        let updated =
            store.update(created.id, MovieChanges::default()).unwrap();
        assert_eq!(updated, created);
    }

    #[test]
    fn missing_ids_surface_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = CatalogStore::open(catalog_path(&dir)).unwrap();
        let ghost = MovieId::new(42);

        assert!(store.get(ghost).is_none());
        assert!(matches!(
            store.update(ghost, MovieChanges::default()),
            Err(CatalogError::NotFound(id)) if id == ghost
        ));
        assert!(matches!(
            store.delete(ghost),
            Err(CatalogError::NotFound(id)) if id == ghost
        ));

        let created = store.create(draft("Dune")).unwrap();
        store.delete(created.id).unwrap();
        assert!(matches!(
            store.delete(created.id),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn corrupt_entries_are_dropped_on_load() {
        let dir = TempDir::new().unwrap();
        let path = catalog_path(&dir);
        fs::write(
            &path,
            json!({
                "movies": [
                    {
                        "id": 1,
                        "title": "Dune",
                        "director": "Denis Villeneuve",
                        "genre": "Ciencia Ficción"
                    },
                    { "title": "no id at all" },
                    "not even an object"
                ],
                "next_id": 5
            })
            .to_string(),
        )
        .unwrap();

        let store = CatalogStore::open(&path).unwrap();
        assert_eq!(store.total(), 1);
        let survivor = store.get(MovieId::new(1)).unwrap();
        assert_eq!(survivor.title, "Dune");
        assert_eq!(survivor.year, None);
    }

    #[test]
    fn invalid_counter_is_recomputed_from_max_id() {
        let dir = TempDir::new().unwrap();
        let path = catalog_path(&dir);
        fs::write(
            &path,
            json!({
                "movies": [
                    {
                        "id": 7,
                        "title": "Dune",
                        "director": "Denis Villeneuve",
                        "genre": "Ciencia Ficción"
                    }
                ],
                "next_id": 0
            })
            .to_string(),
        )
        .unwrap();

        let mut store = CatalogStore::open(&path).unwrap();
        let created = store.create(draft("Arrival")).unwrap();
        assert_eq!(created.id, MovieId::new(8));
    }

    #[test]
    fn missing_counter_defaults_to_one_when_empty() {
        let dir = TempDir::new().unwrap();
        let path = catalog_path(&dir);
        fs::write(&path, json!({ "movies": [] }).to_string()).unwrap();

        let mut store = CatalogStore::open(&path).unwrap();
        let created = store.create(draft("Dune")).unwrap();
        assert_eq!(created.id, MovieId::new(1));
    }

    #[test]
    fn malformed_file_falls_back_to_empty_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = catalog_path(&dir);
        fs::write(&path, "{ this is not json").unwrap();

        let store = CatalogStore::open(&path).unwrap();
        assert_eq!(store.total(), 0);
        assert_eq!(read_file(&path), json!({ "movies": [], "next_id": 1 }));
    }

    #[test]
    fn snapshot_layout_matches_the_documented_format() {
        let dir = TempDir::new().unwrap();
        let path = catalog_path(&dir);
        let mut store = CatalogStore::open(&path).unwrap();
        store.create(draft("Dune")).unwrap();

        let document = read_file(&path);
        assert_eq!(document["next_id"], json!(2));
        assert_eq!(document["movies"][0]["id"], json!(1));
        assert_eq!(document["movies"][0]["genre"], json!("Ciencia Ficción"));
        assert_eq!(document["movies"][0]["is_watched"], json!(false));
    }
}
