//! In-memory store for tests. Records every request it receives.

use super::error::StoreError;
use super::store::MovieStore;
use super::types::{Movie, MovieFields, MovieId};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeStore {
  movies: Mutex<Vec<Movie>>,
  requests: Mutex<Vec<String>>,
  failure: Mutex<Option<StoreError>>,
  next_id: Mutex<i64>,
}

impl FakeStore {
  pub fn with_movies(movies: Vec<Movie>) -> Self {
    let next_id = movies
      .iter()
      .filter_map(|m| match m.id {
        MovieId::Number(n) => Some(n),
        MovieId::Text(_) => None,
      })
      .max()
      .unwrap_or(0)
      + 1;

    Self {
      movies: Mutex::new(movies),
      next_id: Mutex::new(next_id),
      ..Self::default()
    }
  }

  /// Make every following request fail with `err`
  pub fn fail_with(&self, err: StoreError) {
    *self.failure.lock().unwrap() = Some(err);
  }

  /// Stop failing
  pub fn recover(&self) {
    *self.failure.lock().unwrap() = None;
  }

  pub fn requests(&self) -> Vec<String> {
    self.requests.lock().unwrap().clone()
  }

  pub fn movies(&self) -> Vec<Movie> {
    self.movies.lock().unwrap().clone()
  }

  /// Change the collection behind the client's back
  pub fn replace_movies(&self, movies: Vec<Movie>) {
    *self.movies.lock().unwrap() = movies;
  }

  fn record(&self, request: String) -> Result<(), StoreError> {
    self.requests.lock().unwrap().push(request);
    match self.failure.lock().unwrap().clone() {
      Some(err) => Err(err),
      None => Ok(()),
    }
  }

  fn not_found(id: &MovieId) -> StoreError {
    StoreError::Status {
      status: reqwest::StatusCode::NOT_FOUND,
      body: format!("no movie {}", id),
    }
  }
}

pub fn movie(id: i64, title: &str, year: i32, genre: &str) -> Movie {
  Movie {
    id: MovieId::Number(id),
    title: title.to_string(),
    genre: genre.to_string(),
    year,
  }
}

#[async_trait]
impl MovieStore for FakeStore {
  async fn list(&self) -> Result<Vec<Movie>, StoreError> {
    self.record("GET /movies".to_string())?;
    Ok(self.movies())
  }

  async fn create(&self, fields: &MovieFields) -> Result<Movie, StoreError> {
    self.record("POST /movies".to_string())?;
    let mut next_id = self.next_id.lock().unwrap();
    let created = Movie::with_fields(MovieId::Number(*next_id), fields.clone());
    *next_id += 1;
    self.movies.lock().unwrap().push(created.clone());
    Ok(created)
  }

  async fn update(&self, movie: &Movie) -> Result<Movie, StoreError> {
    self.record(format!("PUT /movies/{}", movie.id))?;
    let mut movies = self.movies.lock().unwrap();
    let slot = movies
      .iter_mut()
      .find(|m| m.id == movie.id)
      .ok_or_else(|| Self::not_found(&movie.id))?;
    *slot = movie.clone();
    Ok(movie.clone())
  }

  async fn delete(&self, id: &MovieId) -> Result<(), StoreError> {
    self.record(format!("DELETE /movies/{}", id))?;
    let mut movies = self.movies.lock().unwrap();
    let before = movies.len();
    movies.retain(|m| &m.id != id);
    if movies.len() == before {
      return Err(Self::not_found(id));
    }
    Ok(())
  }
}
