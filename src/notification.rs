//! User-visible messages shown in the status bar.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
  Info,
  Success,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub level: NotificationLevel,
  pub message: String,
  pub created_at: DateTime<Local>,
}

impl Notification {
  pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
    Self {
      level,
      message: message.into(),
      created_at: Local::now(),
    }
  }

  pub fn info(message: impl Into<String>) -> Self {
    Self::new(NotificationLevel::Info, message)
  }

  pub fn success(message: impl Into<String>) -> Self {
    Self::new(NotificationLevel::Success, message)
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self::new(NotificationLevel::Error, message)
  }

  pub fn is_error(&self) -> bool {
    self.level == NotificationLevel::Error
  }

  /// `HH:MM:SS message`
  pub fn display(&self) -> String {
    format!("{} {}", self.created_at.format("%H:%M:%S"), self.message)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_has_timestamp_prefix() {
    let n = Notification::error("Could not add movie.");
    let shown = n.display();
    assert!(shown.ends_with(" Could not add movie."));
    assert_eq!(shown.len(), "00:00:00 Could not add movie.".len());
    assert!(n.is_error());
  }
}
