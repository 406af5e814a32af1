pub mod components;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::app::App;
use crate::movies::MovieStore;
use ratatui::prelude::*;
use ratatui::widgets::ListState;

/// Main draw function
pub fn draw<S: MovieStore>(frame: &mut Frame, app: &mut App<S>) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Movie list
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  let shortcuts = view::ordered(app.view().shortcuts());
  renderfns::draw_header(frame, chunks[0], app.title(), &shortcuts);

  app.view_mut().render(frame, chunks[1]);

  let hint = if app.view().is_busy() {
    "working..."
  } else {
    ":command  /search  j/k:nav  q:quit"
  };
  renderfns::draw_status_bar(frame, chunks[2], app.view().notification(), hint);

  // Palette draws last so it sits above the view's overlays
  app.command_input().render_overlay(frame, chunks[1]);
}

/// Area for a k9s style overlay anchored to the top left of `area`
pub fn overlay_at_top(area: Rect, height: u16) -> Rect {
  let width = (area.width * 60 / 100).clamp(30, 60).min(area.width.saturating_sub(2));
  let height = height.min(area.height.saturating_sub(2));
  Rect::new(area.x + 1, area.y + 1, width, height)
}

/// `width` x `height` rect centred in `area`, shrunk to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect::new(
    area.x + (area.width - width) / 2,
    area.y + (area.height - height) / 2,
    width,
    height,
  )
}

/// Keep the selection inside a list of `len` rows
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
    return;
  }
  match state.selected() {
    None => state.select(Some(0)),
    Some(i) if i >= len => state.select(Some(len - 1)),
    Some(_) => {}
  }
}
