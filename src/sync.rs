//! Client-side mirror of the remote movie collection.
//!
//! [`ListSyncClient`] owns the cache of the last successful fetch. The cache
//! is only ever replaced wholesale by a load; mutations go to the store and,
//! once the store confirms them, are followed by a full reload.
//!
//! Every network step is exposed twice: as a `'static` future plus an
//! `apply_*` method (so the UI can run it as a background [`Task`]), and as a
//! plain `async fn` that does both.
//!
//! [`Task`]: crate::task::Task

use crate::movies::{Movie, MovieForm, MovieId, MovieStore, StoreError, SyncError};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::{error, info};

pub const NO_RESULTS_MESSAGE: &str = "No movies found matching your criteria.";
pub const LOAD_FAILED_MESSAGE: &str = "Unable to fetch movies. Is the server running?";

/// Where the client is in its load cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
  #[default]
  Idle,
  Loading,
  Loaded,
  LoadFailed(String),
}

/// A request that changes the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
  Create,
  Update,
  Delete,
}

impl Mutation {
  pub fn success_message(&self) -> &'static str {
    match self {
      Mutation::Create => "Movie added.",
      Mutation::Update => "Movie updated.",
      Mutation::Delete => "Movie deleted.",
    }
  }

  pub fn failure_message(&self) -> &'static str {
    match self {
      Mutation::Create => "Could not add movie. See log for details.",
      Mutation::Update => "Could not update movie. See log for details.",
      Mutation::Delete => "Could not delete movie. See log for details.",
    }
  }

  /// What to tell the user when the form input is rejected
  pub fn validation_message(&self) -> &'static str {
    match self {
      Mutation::Create => "Please provide title and year.",
      Mutation::Update | Mutation::Delete => "Invalid title or year.",
    }
  }
}

pub type FetchFuture = BoxFuture<'static, Result<Vec<Movie>, StoreError>>;
pub type MutationFuture = BoxFuture<'static, Result<(), StoreError>>;

/// What the list should show for a given cache state and filter
#[derive(Debug, PartialEq, Eq)]
pub enum ListContent<'a> {
  /// Nothing fetched yet
  Loading,
  /// The last load failed
  Failed(&'a str),
  /// The filtered sequence is empty
  Empty,
  Rows(Vec<&'a Movie>),
}

impl<'a> ListContent<'a> {
  pub fn of(status: &'a LoadStatus, cache: &'a [Movie], query: &str) -> Self {
    match status {
      LoadStatus::LoadFailed(_) => ListContent::Failed(LOAD_FAILED_MESSAGE),
      LoadStatus::Idle | LoadStatus::Loading if cache.is_empty() => ListContent::Loading,
      _ => {
        let rows = filter_movies(cache, query);
        if rows.is_empty() {
          ListContent::Empty
        } else {
          ListContent::Rows(rows)
        }
      }
    }
  }
}

/// Case-insensitive substring match on title or genre.
///
/// The query is trimmed first; an empty query keeps everything.
pub fn filter_movies<'a>(movies: &'a [Movie], query: &str) -> Vec<&'a Movie> {
  let needle = query.trim().to_lowercase();
  if needle.is_empty() {
    return movies.iter().collect();
  }

  movies
    .iter()
    .filter(|m| {
      m.title.to_lowercase().contains(&needle) || m.genre.to_lowercase().contains(&needle)
    })
    .collect()
}

/// In-memory mirror of the store plus the operations that keep it in sync
pub struct ListSyncClient<S> {
  store: Arc<S>,
  cache: Vec<Movie>,
  status: LoadStatus,
}

impl<S: MovieStore> ListSyncClient<S> {
  pub fn new(store: S) -> Self {
    Self::with_shared_store(Arc::new(store))
  }

  pub fn with_shared_store(store: Arc<S>) -> Self {
    Self {
      store,
      cache: Vec::new(),
      status: LoadStatus::Idle,
    }
  }

  pub fn cache(&self) -> &[Movie] {
    &self.cache
  }

  pub fn status(&self) -> &LoadStatus {
    &self.status
  }

  pub fn is_loading(&self) -> bool {
    self.status == LoadStatus::Loading
  }

  pub fn store(&self) -> &Arc<S> {
    &self.store
  }

  pub fn filter(&self, query: &str) -> Vec<&Movie> {
    filter_movies(&self.cache, query)
  }

  pub fn content(&self, query: &str) -> ListContent<'_> {
    ListContent::of(&self.status, &self.cache, query)
  }

  /// Enter the loading state and return the fetch to run.
  ///
  /// The cache stays as it is until [`apply_fetch`](Self::apply_fetch).
  pub fn begin_load(&mut self) -> FetchFuture {
    self.status = LoadStatus::Loading;
    let store = self.store.clone();
    async move { store.list().await }.boxed()
  }

  /// Settle a fetch: replace the cache on success, keep it on failure
  pub fn apply_fetch(&mut self, result: Result<Vec<Movie>, StoreError>) -> Result<(), StoreError> {
    match result {
      Ok(movies) => {
        info!(count = movies.len(), "loaded movies");
        self.cache = movies;
        self.status = LoadStatus::Loaded;
        Ok(())
      }
      Err(e) => {
        error!(error = %e, "error fetching movies");
        self.status = LoadStatus::LoadFailed(e.to_string());
        Err(e)
      }
    }
  }

  pub async fn load(&mut self) -> Result<(), StoreError> {
    let result = self.begin_load().await;
    self.apply_fetch(result)
  }

  /// Validate and build the create request. Invalid input sends nothing.
  pub fn create_request(&self, form: &MovieForm) -> Result<MutationFuture, SyncError> {
    let fields = form.validate_new()?;
    let store = self.store.clone();
    Ok(
      async move {
        let created = store.create(&fields).await?;
        info!(id = %created.id, title = %created.title, "created movie");
        Ok::<(), StoreError>(())
      }
      .boxed(),
    )
  }

  /// Validate and build the update request for record `id`
  pub fn update_request(&self, id: &MovieId, form: &MovieForm) -> Result<MutationFuture, SyncError> {
    let fields = form.validate()?;
    let movie = Movie::with_fields(id.clone(), fields);
    let store = self.store.clone();
    Ok(
      async move {
        store.update(&movie).await?;
        info!(id = %movie.id, "updated movie");
        Ok::<(), StoreError>(())
      }
      .boxed(),
    )
  }

  /// Build the delete request. Callers obtain confirmation first.
  pub fn delete_request(&self, id: &MovieId) -> MutationFuture {
    let store = self.store.clone();
    let id = id.clone();
    async move {
      store.delete(&id).await?;
      info!(%id, "deleted movie");
      Ok::<(), StoreError>(())
    }
    .boxed()
  }

  pub async fn create(&mut self, form: &MovieForm) -> Result<(), SyncError> {
    let request = self.create_request(form)?;
    self.finish_mutation(Mutation::Create, request).await
  }

  pub async fn update(&mut self, id: &MovieId, form: &MovieForm) -> Result<(), SyncError> {
    let request = self.update_request(id, form)?;
    self.finish_mutation(Mutation::Update, request).await
  }

  pub async fn delete(&mut self, id: &MovieId) -> Result<(), SyncError> {
    let request = self.delete_request(id);
    self.finish_mutation(Mutation::Delete, request).await
  }

  /// Await a mutation and reload on success.
  ///
  /// A reload failure is reflected in [`status`](Self::status), not in the
  /// returned result: the mutation itself went through.
  async fn finish_mutation(
    &mut self,
    mutation: Mutation,
    request: MutationFuture,
  ) -> Result<(), SyncError> {
    if let Err(e) = request.await {
      error!(?mutation, error = %e, "mutation failed");
      return Err(e.into());
    }
    let _ = self.load().await;
    Ok(())
  }
}
