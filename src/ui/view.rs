/// A keyboard shortcut hint for display in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutInfo {
  pub key: &'static str,
  pub label: &'static str,
  pub priority: u8, // Lower = shown first
}

impl ShortcutInfo {
  pub const fn new(key: &'static str, label: &'static str) -> Self {
    Self {
      key,
      label,
      priority: 100,
    }
  }

  pub const fn with_priority(mut self, priority: u8) -> Self {
    self.priority = priority;
    self
  }
}

/// Sort shortcuts for display, lowest priority value first
pub fn ordered(mut shortcuts: Vec<ShortcutInfo>) -> Vec<ShortcutInfo> {
  shortcuts.sort_by_key(|s| s.priority);
  shortcuts
}

/// Actions a view can request from the App in response to user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
  None,
  Quit,
}
