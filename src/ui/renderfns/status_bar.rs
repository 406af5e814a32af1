use super::utils::fit;
use crate::notification::{Notification, NotificationLevel};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Bottom line: the latest notification, or `hint` when there is none
pub fn draw_status_bar(frame: &mut Frame, area: Rect, notification: Option<&Notification>, hint: &str) {
  let width = area.width as usize;
  let line = match notification {
    Some(n) => Line::styled(fit(&format!(" {}", n.display()), width), level_style(n.level)),
    None => Line::styled(fit(&format!(" {}", hint), width), Style::default().fg(Color::DarkGray)),
  };

  let paragraph = Paragraph::new(line).style(Style::default().bg(Color::Black));
  frame.render_widget(paragraph, area);
}

fn level_style(level: NotificationLevel) -> Style {
  match level {
    NotificationLevel::Info => Style::default().fg(Color::White),
    NotificationLevel::Success => Style::default().fg(Color::Green),
    NotificationLevel::Error => Style::default().fg(Color::Red).bold(),
  }
}
