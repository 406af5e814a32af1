use super::error::StoreError;
use super::store::MovieStore;
use super::types::{Movie, MovieFields, MovieId};
use crate::config::ApiConfig;
use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// REST implementation of [`MovieStore`] for a json-server style collection.
///
/// `GET base`, `POST base`, `PUT base/{id}`, `DELETE base/{id}`.
#[derive(Clone)]
pub struct HttpMovieStore {
  client: reqwest::Client,
  base_url: Url,
}

impl HttpMovieStore {
  pub fn new(config: &ApiConfig) -> Result<Self> {
    let base_url = config.parsed_url()?;
    if base_url.cannot_be_a_base() {
      return Err(eyre!("API url {} cannot hold a record path", base_url));
    }

    let client = reqwest::Client::builder()
      .timeout(Duration::from_millis(config.timeout_ms))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client, base_url })
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// URL of a single record, `{base}/{id}` with the id percent-encoded
  pub fn record_url(&self, id: &MovieId) -> Url {
    let mut url = self.base_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
      segments.pop_if_empty().push(&id.to_string());
    }
    url
  }

  async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
  ) -> Result<T, StoreError> {
    let response = Self::check_status(response).await?;
    Ok(response.json::<T>().await?)
  }

  async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status { status, body })
  }
}

#[async_trait]
impl MovieStore for HttpMovieStore {
  async fn list(&self) -> Result<Vec<Movie>, StoreError> {
    debug!(url = %self.base_url, "GET movies");
    let response = self.client.get(self.base_url.clone()).send().await?;
    Self::parse_response(response).await
  }

  async fn create(&self, fields: &MovieFields) -> Result<Movie, StoreError> {
    debug!(url = %self.base_url, title = %fields.title, "POST movie");
    let response = self
      .client
      .post(self.base_url.clone())
      .json(fields)
      .send()
      .await?;
    Self::parse_response(response).await
  }

  async fn update(&self, movie: &Movie) -> Result<Movie, StoreError> {
    let url = self.record_url(&movie.id);
    debug!(%url, "PUT movie");
    let response = self.client.put(url).json(movie).send().await?;
    Self::parse_response(response).await
  }

  async fn delete(&self, id: &MovieId) -> Result<(), StoreError> {
    let url = self.record_url(id);
    debug!(%url, "DELETE movie");
    let response = self.client.delete(url).send().await?;
    // json-server answers with `{}` or an empty body; neither carries data
    Self::check_status(response).await?;
    Ok(())
  }
}
