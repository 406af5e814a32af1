use super::error::StoreError;
use super::types::{Movie, MovieFields, MovieId};
use async_trait::async_trait;

/// The remote collection of movies.
///
/// The store is the source of truth; implementations perform exactly one
/// request per call and never retry.
#[async_trait]
pub trait MovieStore: Send + Sync + 'static {
  /// Fetch the whole collection
  async fn list(&self) -> Result<Vec<Movie>, StoreError>;

  /// Create a record; the store assigns the id
  async fn create(&self, fields: &MovieFields) -> Result<Movie, StoreError>;

  /// Replace a record with `movie`
  async fn update(&self, movie: &Movie) -> Result<Movie, StoreError>;

  async fn delete(&self, id: &MovieId) -> Result<(), StoreError>;
}
