pub mod client;
pub mod error;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use client::HttpMovieStore;
pub use error::{StoreError, SyncError, ValidationError};
pub use store::MovieStore;
pub use types::{Movie, MovieFields, MovieForm, MovieId};
