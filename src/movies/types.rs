use super::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned movie identifier.
///
/// json-server hands out numeric ids in older releases and string ids in
/// newer ones, so both are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
  Number(i64),
  Text(String),
}

impl fmt::Display for MovieId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MovieId::Number(n) => write!(f, "{}", n),
      MovieId::Text(s) => f.write_str(s),
    }
  }
}

impl From<i64> for MovieId {
  fn from(n: i64) -> Self {
    MovieId::Number(n)
  }
}

impl From<&str> for MovieId {
  fn from(s: &str) -> Self {
    MovieId::Text(s.to_string())
  }
}

/// A movie record as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
  pub id: MovieId,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub genre: String,
  pub year: i32,
}

impl Movie {
  /// Build the full record sent on update
  pub fn with_fields(id: MovieId, fields: MovieFields) -> Self {
    Self {
      id,
      title: fields.title,
      genre: fields.genre,
      year: fields.year,
    }
  }

  /// One-line label used by the list view
  pub fn label(&self) -> String {
    format!("{} ({}) - {}", self.title, self.year, self.genre)
  }
}

/// Validated, store-bound attributes of a movie (the create body)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieFields {
  pub title: String,
  pub genre: String,
  pub year: i32,
}

/// Raw form input, exactly as typed.
///
/// Nothing here is trusted until [`MovieForm::validate`] turns it into
/// [`MovieFields`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieForm {
  pub title: String,
  pub genre: String,
  pub year: String,
}

impl MovieForm {
  pub fn new(title: impl Into<String>, genre: impl Into<String>, year: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      genre: genre.into(),
      year: year.into(),
    }
  }

  /// Prefill from an existing record (edit flow)
  pub fn from_movie(movie: &Movie) -> Self {
    Self {
      title: movie.title.clone(),
      genre: movie.genre.clone(),
      year: movie.year.to_string(),
    }
  }

  pub fn validate(&self) -> Result<MovieFields, ValidationError> {
    let title = self.title.trim();
    if title.is_empty() {
      return Err(ValidationError::MissingTitle);
    }

    let year_input = self.year.trim();
    let year = year_input
      .parse::<i32>()
      .map_err(|_| ValidationError::InvalidYear(year_input.to_string()))?;

    Ok(MovieFields {
      title: title.to_string(),
      genre: self.genre.trim().to_string(),
      year,
    })
  }

  /// Validation for a new record: as [`validate`](Self::validate), but a
  /// year of `0` counts as missing.
  pub fn validate_new(&self) -> Result<MovieFields, ValidationError> {
    let fields = self.validate()?;
    if fields.year == 0 {
      return Err(ValidationError::InvalidYear(self.year.trim().to_string()));
    }
    Ok(fields)
  }
}
