//! Error taxonomy for talking to the movie store.

use reqwest::StatusCode;

/// Failure reported by a [`MovieStore`](super::store::MovieStore)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
  /// The request never got a response (connection refused, DNS, timeout)
  #[error("network error: {0}")]
  Network(String),
  /// The store answered with a non-success status
  #[error("store responded with {status}: {body}")]
  Status { status: StatusCode, body: String },
  /// Success status, but the body was not what we expected
  #[error("unexpected response body: {0}")]
  Decode(String),
}

impl From<reqwest::Error> for StoreError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_decode() {
      StoreError::Decode(err.to_string())
    } else if let Some(status) = err.status() {
      StoreError::Status {
        status,
        body: err.to_string(),
      }
    } else {
      StoreError::Network(err.to_string())
    }
  }
}

/// Form input that must never reach the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
  #[error("title is required")]
  MissingTitle,
  #[error("year must be a whole number, got {0:?}")]
  InvalidYear(String),
}

/// Outcome of a create/update/delete round trip
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
  #[error(transparent)]
  Validation(#[from] ValidationError),
  #[error(transparent)]
  Store(#[from] StoreError),
}

impl SyncError {
  pub fn is_validation(&self) -> bool {
    matches!(self, SyncError::Validation(_))
  }
}
