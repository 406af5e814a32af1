//! reel: a k9s style terminal client for a movies REST collection.
//!
//! [`sync::ListSyncClient`] keeps a local cache of the collection in step
//! with a [`movies::MovieStore`]; the `ui` module renders it.

pub mod app;
pub mod commands;
pub mod config;
pub mod event;
pub mod logging;
pub mod movies;
pub mod notification;
pub mod sync;
pub mod task;
pub mod ui;
