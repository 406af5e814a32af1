use super::KeyResult;
use crate::ui::centered;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmEvent<T> {
  /// User said yes; here is what they agreed to
  Confirmed(T),
  Cancelled,
}

/// Yes/no question carrying the payload it confirms
#[derive(Debug, Clone)]
pub struct ConfirmDialog<T> {
  pending: Option<(String, T)>,
}

impl<T> Default for ConfirmDialog<T> {
  fn default() -> Self {
    Self { pending: None }
  }
}

impl<T: Clone> ConfirmDialog<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.pending.is_some()
  }

  pub fn ask(&mut self, prompt: impl Into<String>, payload: T) {
    self.pending = Some((prompt.into(), payload));
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<ConfirmEvent<T>> {
    if self.pending.is_none() {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => match self.pending.take() {
        Some((_, payload)) => KeyResult::Event(ConfirmEvent::Confirmed(payload)),
        None => KeyResult::Handled,
      },
      KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
        self.pending = None;
        KeyResult::Event(ConfirmEvent::Cancelled)
      }
      _ => KeyResult::Handled,
    }
  }

  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    let Some((prompt, _)) = &self.pending else {
      return;
    };

    let overlay_area = centered(area, 50, 5);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Red))
      .title(" Confirm ");

    let text = vec![
      Line::raw(prompt.as_str()),
      Line::from(vec![
        Span::styled("<y>", Style::default().fg(Color::Cyan)),
        Span::styled(" yes   ", Style::default().fg(Color::DarkGray)),
        Span::styled("<n>", Style::default().fg(Color::Cyan)),
        Span::styled(" no", Style::default().fg(Color::DarkGray)),
      ]),
    ];
    let paragraph = Paragraph::new(text)
      .block(block)
      .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, overlay_area);
  }
}
