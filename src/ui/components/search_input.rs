use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::ui::overlay_at_top;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Rows the open overlay covers, borders included
const OVERLAY_HEIGHT: u16 = 3;

/// Events emitted by search input that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
  /// Query changed (on each keystroke; empty string when cleared)
  Changed(String),
  /// Overlay closed, filter stays applied
  Submitted,
}

/// Live filter box opened with `/`.
///
/// The query survives closing the overlay, so reopening refines the current
/// filter instead of starting over.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
  input: TextInput,
  active: bool,
}

impl SearchInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn query(&self) -> &str {
    self.input.value()
  }

  /// Rows at the top of the list hidden by the overlay
  pub fn overlay_height(&self) -> u16 {
    if self.active {
      OVERLAY_HEIGHT
    } else {
      0
    }
  }

  pub fn activate(&mut self) {
    self.active = true;
  }

  /// Drop the query without touching the overlay state
  pub fn clear(&mut self) {
    self.input.clear();
  }

  /// Handle a key event.
  /// Call this regardless of active state - it handles activation too
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<SearchEvent> {
    if !self.active {
      if key.code == KeyCode::Char('/') {
        self.activate();
        return KeyResult::Handled;
      }
      return KeyResult::NotHandled;
    }

    match self.input.handle_key(key) {
      InputResult::Submitted(_) => {
        self.active = false;
        KeyResult::Event(SearchEvent::Submitted)
      }
      InputResult::Cancelled => {
        self.active = false;
        self.input.clear();
        KeyResult::Event(SearchEvent::Changed(String::new()))
      }
      InputResult::Consumed => {
        KeyResult::Event(SearchEvent::Changed(self.input.value().to_string()))
      }
      // Swallow everything else while the box is open
      InputResult::NotHandled => KeyResult::Handled,
    }
  }

  /// Render the search overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect, matches: usize) {
    if !self.active {
      return;
    }

    let overlay_area = overlay_at_top(area, OVERLAY_HEIGHT);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Search title or genre ")
      .title_bottom(Line::from(format!(" {} match(es) ", matches)).right_aligned());

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    let mut spans = vec![Span::styled("/", Style::default().fg(Color::Yellow))];
    spans.extend(self.input.spans(true));
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
  }
}
