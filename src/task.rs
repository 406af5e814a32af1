//! Background requests polled from the UI tick.
//!
//! A [`Task<T>`] runs a future on the tokio runtime and hands its output back
//! through a channel, so the draw loop never waits on the network:
//!
//! ```ignore
//! let mut load = Task::spawn(sync.begin_load());
//!
//! // In event loop tick
//! match load.poll() {
//!     TaskPoll::Ready(result) => sync.apply_fetch(result),
//!     TaskPoll::Pending => {}
//!     TaskPoll::Lost => { /* the future panicked */ }
//! }
//! ```

use std::future::Future;
use tokio::sync::oneshot;

/// Result of polling a [`Task`]
#[derive(Debug, PartialEq, Eq)]
pub enum TaskPoll<T> {
  /// Still running (or already consumed)
  Pending,
  /// Finished with this output
  Ready(T),
  /// The future went away without producing output
  Lost,
}

/// A spawned future whose output is collected with [`Task::poll`].
///
/// Dropping a task abandons its output; the future itself keeps running to
/// completion, so an issued request is never cut short.
pub struct Task<T> {
  receiver: Option<oneshot::Receiver<T>>,
}

impl<T: Send + 'static> Task<T> {
  pub fn spawn<F>(future: F) -> Self
  where
    F: Future<Output = T> + Send + 'static,
  {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let output = future.await;
      // Ignore send errors - the task may have been dropped
      let _ = tx.send(output);
    });

    Self { receiver: Some(rx) }
  }

  /// Whether output is still outstanding
  pub fn is_pending(&self) -> bool {
    self.receiver.is_some()
  }

  /// Collect the output if it has arrived. Never blocks.
  pub fn poll(&mut self) -> TaskPoll<T> {
    let receiver = match &mut self.receiver {
      Some(rx) => rx,
      None => return TaskPoll::Pending,
    };

    match receiver.try_recv() {
      Ok(output) => {
        self.receiver = None;
        TaskPoll::Ready(output)
      }
      Err(oneshot::error::TryRecvError::Empty) => TaskPoll::Pending,
      Err(oneshot::error::TryRecvError::Closed) => {
        self.receiver = None;
        TaskPoll::Lost
      }
    }
  }
}

impl<T> std::fmt::Debug for Task<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Task")
      .field("pending", &self.receiver.is_some())
      .finish()
  }
}
