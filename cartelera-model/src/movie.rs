use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, Violation};
use crate::genre::Genre;
use crate::ids::MovieId;

/// Maximum length of a movie title, in characters.
pub const TITLE_MAX_LEN: usize = 200;
/// Maximum length of a director name, in characters.
pub const DIRECTOR_MAX_LEN: usize = 100;
/// Maximum length of a description, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 1000;
/// Earliest accepted release year.
pub const YEAR_MIN: i32 = 1880;
/// How far past the current year a release year may lie.
pub const YEAR_FUTURE_SLACK: i32 = 5;
/// Accepted duration range, in minutes.
pub const DURATION_RANGE: std::ops::RangeInclusive<i64> = 1..=600;
/// Accepted rating range.
pub const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

/// Latest release year accepted right now.
pub fn max_release_year() -> i32 {
    Utc::now().year() + YEAR_FUTURE_SLACK
}

/// One movie entry in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Store-assigned identifier, immutable once assigned.
    pub id: MovieId,
    /// Title, trimmed of surrounding whitespace.
    pub title: String,
    /// Director name, trimmed of surrounding whitespace.
    pub director: String,
    /// Release year, when known.
    #[serde(default)]
    pub year: Option<i32>,
    /// Principal genre.
    pub genre: Genre,
    /// Runtime in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    /// Average rating on a 0–10 scale.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Short free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Sale or rental price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Whether the movie has been watched.
    #[serde(default)]
    pub is_watched: bool,
}

impl MovieRecord {
    /// Build a record from a validated draft and a store-assigned id.
    pub fn from_draft(id: MovieId, draft: MovieDraft) -> Self {
        Self {
            id,
            title: draft.title,
            director: draft.director,
            year: draft.year,
            genre: draft.genre,
            duration: draft.duration,
            rating: draft.rating,
            description: draft.description,
            price: draft.price,
            is_watched: draft.is_watched,
        }
    }

    /// Shallow-merge validated changes into this record.
    ///
    /// Fields absent from `changes` keep their current value; `id` is never
    /// touched.
    pub fn apply(&mut self, changes: MovieChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(director) = changes.director {
            self.director = director;
        }
        if let Some(year) = changes.year {
            self.year = Some(year);
        }
        if let Some(genre) = changes.genre {
            self.genre = genre;
        }
        if let Some(duration) = changes.duration {
            self.duration = Some(duration);
        }
        if let Some(rating) = changes.rating {
            self.rating = Some(rating);
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(price) = changes.price {
            self.price = Some(price);
        }
        if let Some(is_watched) = changes.is_watched {
            self.is_watched = is_watched;
        }
    }
}

/// Payload accepted by the create endpoint.
///
/// Every field is loosely typed so that missing or out-of-range values come
/// back as itemized violations rather than deserialization failures;
/// [`CreateMovieRequest::validate`] enforces required-ness and ranges.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMovieRequest {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub duration: Option<i64>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_watched: Option<bool>,
}

/// Payload accepted by the update endpoint. All fields optional; absent
/// fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub duration: Option<i64>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_watched: Option<bool>,
}

/// Fully validated, normalized create payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDraft {
    pub title: String,
    pub director: String,
    pub year: Option<i32>,
    pub genre: Genre,
    pub duration: Option<u32>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_watched: bool,
}

/// Validated partial update. `None` means "leave the field untouched".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<Genre>,
    pub duration: Option<u32>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_watched: Option<bool>,
}

impl MovieChanges {
    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.director.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.duration.is_none()
            && self.rating.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.is_watched.is_none()
    }
}

impl CreateMovieRequest {
    /// Validate the payload, returning a normalized draft or every
    /// violation found.
    pub fn validate(self) -> Result<MovieDraft, ValidationError> {
        let title = required_text("title", self.title, TITLE_MAX_LEN);
        let director =
            required_text("director", self.director, DIRECTOR_MAX_LEN);
        let genre = required_genre(self.genre);
        let year = optional_year(self.year);
        let duration = optional_duration(self.duration);
        let rating = optional_rating(self.rating);
        let description = optional_description(self.description);
        let price = optional_price(self.price);

        let mut violations = Vec::new();
        collect(&mut violations, &title);
        collect(&mut violations, &director);
        collect(&mut violations, &genre);
        collect(&mut violations, &year);
        collect(&mut violations, &duration);
        collect(&mut violations, &rating);
        collect(&mut violations, &description);
        collect(&mut violations, &price);

        match (
            title,
            director,
            genre,
            year,
            duration,
            rating,
            description,
            price,
        ) {
            (
                Ok(title),
                Ok(director),
                Ok(genre),
                Ok(year),
                Ok(duration),
                Ok(rating),
                Ok(description),
                Ok(price),
            ) => Ok(MovieDraft {
                title,
                director,
                year,
                genre,
                duration,
                rating,
                description,
                price,
                is_watched: self.is_watched.unwrap_or(false),
            }),
            _ => Err(ValidationError::new(violations)),
        }
    }
}

impl UpdateMovieRequest {
    /// Validate only the fields present in the payload.
    pub fn validate(self) -> Result<MovieChanges, ValidationError> {
        let mut violations = Vec::new();
        let mut changes = MovieChanges::default();

        if let Some(raw) = self.title {
            match required_text("title", Some(raw), TITLE_MAX_LEN) {
                Ok(title) => changes.title = Some(title),
                Err(violation) => violations.push(violation),
            }
        }
        if let Some(raw) = self.director {
            match required_text("director", Some(raw), DIRECTOR_MAX_LEN) {
                Ok(director) => changes.director = Some(director),
                Err(violation) => violations.push(violation),
            }
        }
        if let Some(raw) = self.genre {
            match required_genre(Some(raw)) {
                Ok(genre) => changes.genre = Some(genre),
                Err(violation) => violations.push(violation),
            }
        }
        if self.year.is_some() {
            match optional_year(self.year) {
                Ok(year) => changes.year = year,
                Err(violation) => violations.push(violation),
            }
        }
        if self.duration.is_some() {
            match optional_duration(self.duration) {
                Ok(duration) => changes.duration = duration,
                Err(violation) => violations.push(violation),
            }
        }
        if self.rating.is_some() {
            match optional_rating(self.rating) {
                Ok(rating) => changes.rating = rating,
                Err(violation) => violations.push(violation),
            }
        }
        if let Some(raw) = self.description {
            match optional_description(Some(raw)) {
                Ok(description) => changes.description = description,
                Err(violation) => violations.push(violation),
            }
        }
        if self.price.is_some() {
            match optional_price(self.price) {
                Ok(price) => changes.price = price,
                Err(violation) => violations.push(violation),
            }
        }
        changes.is_watched = self.is_watched;

        if violations.is_empty() {
            Ok(changes)
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

fn collect<T>(violations: &mut Vec<Violation>, result: &Result<T, Violation>) {
    if let Err(violation) = result {
        violations.push(violation.clone());
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    max_len: usize,
) -> Result<String, Violation> {
    let Some(raw) = value else {
        return Err(Violation::new(field, "field is required"));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Violation::new(
            field,
            "must not be empty or whitespace-only",
        ));
    }
    if trimmed.chars().count() > max_len {
        return Err(Violation::new(
            field,
            format!("must be at most {max_len} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

fn required_genre(value: Option<String>) -> Result<Genre, Violation> {
    let Some(raw) = value else {
        return Err(Violation::new("genre", "field is required"));
    };
    Genre::parse(&raw).ok_or_else(|| {
        Violation::new(
            "genre",
            format!(
                "unknown genre '{}'; valid genres are: {}",
                raw.trim(),
                Genre::valid_names()
            ),
        )
    })
}

fn optional_year(value: Option<i64>) -> Result<Option<i32>, Violation> {
    let Some(year) = value else { return Ok(None) };
    let max = i64::from(max_release_year());
    if year < i64::from(YEAR_MIN) || year > max {
        return Err(Violation::new(
            "year",
            format!("must be between {YEAR_MIN} and {max}"),
        ));
    }
    Ok(Some(year as i32))
}

fn optional_duration(value: Option<i64>) -> Result<Option<u32>, Violation> {
    let Some(duration) = value else { return Ok(None) };
    if !DURATION_RANGE.contains(&duration) {
        return Err(Violation::new(
            "duration",
            format!(
                "must be between {} and {} minutes",
                DURATION_RANGE.start(),
                DURATION_RANGE.end()
            ),
        ));
    }
    Ok(Some(duration as u32))
}

fn optional_rating(value: Option<f64>) -> Result<Option<f64>, Violation> {
    let Some(rating) = value else { return Ok(None) };
    if !RATING_RANGE.contains(&rating) {
        return Err(Violation::new(
            "rating",
            format!(
                "must be between {:.1} and {:.1}",
                RATING_RANGE.start(),
                RATING_RANGE.end()
            ),
        ));
    }
    Ok(Some(rating))
}

fn optional_description(
    value: Option<String>,
) -> Result<Option<String>, Violation> {
    let Some(description) = value else { return Ok(None) };
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(Violation::new(
            "description",
            format!("must be at most {DESCRIPTION_MAX_LEN} characters"),
        ));
    }
    Ok(Some(description))
}

fn optional_price(value: Option<f64>) -> Result<Option<f64>, Violation> {
    let Some(price) = value else { return Ok(None) };
    if price < 0.0 {
        return Err(Violation::new("price", "must be zero or greater"));
    }
    Ok(Some(price))
}
