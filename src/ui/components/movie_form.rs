use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::movies::{Movie, MovieForm, MovieId};
use crate::ui::centered;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

const LABELS: [&str; 3] = ["Title", "Genre", "Year"];
const TITLE: usize = 0;
const GENRE: usize = 1;
const YEAR: usize = 2;

/// What the form is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
  Add,
  Edit(MovieId),
}

/// Events emitted by the form that the parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
  /// Enter pressed; the raw input, not yet validated
  Submitted(MovieForm),
  /// Esc pressed; nothing should happen
  Cancelled,
}

/// Add/edit form with title, genre and year fields.
///
/// The form never validates or sends anything itself. It hands the typed
/// values to its parent, which reports errors back with
/// [`set_error`](Self::set_error) and closes it once the store has accepted
/// the change.
#[derive(Debug, Clone)]
pub struct MovieFormDialog {
  active: bool,
  mode: FormMode,
  fields: [TextInput; 3],
  focus: usize,
  error: Option<String>,
  busy: bool,
}

impl Default for MovieFormDialog {
  fn default() -> Self {
    Self {
      active: false,
      mode: FormMode::Add,
      fields: Default::default(),
      focus: TITLE,
      error: None,
      busy: false,
    }
  }
}

impl MovieFormDialog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn mode(&self) -> &FormMode {
    &self.mode
  }

  pub fn is_busy(&self) -> bool {
    self.busy
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  /// Open the add form. Values typed before a failed save are kept.
  pub fn open_add(&mut self) {
    if self.mode != FormMode::Add {
      self.reset();
    }
    self.mode = FormMode::Add;
    self.active = true;
  }

  /// Open the edit form prefilled from `movie`
  pub fn open_edit(&mut self, movie: &Movie) {
    let form = MovieForm::from_movie(movie);
    self.fields = [
      TextInput::with_value(&form.title),
      TextInput::with_value(&form.genre),
      TextInput::with_value(&form.year),
    ];
    self.mode = FormMode::Edit(movie.id.clone());
    self.focus = TITLE;
    self.error = None;
    self.busy = false;
    self.active = true;
  }

  pub fn close(&mut self) {
    self.active = false;
    self.busy = false;
  }

  /// Empty every field
  pub fn reset(&mut self) {
    self.fields = Default::default();
    self.focus = TITLE;
    self.error = None;
    self.busy = false;
  }

  pub fn set_error(&mut self, message: impl Into<String>) {
    self.error = Some(message.into());
    self.busy = false;
  }

  /// Mark the form as waiting on the store
  pub fn set_busy(&mut self) {
    self.error = None;
    self.busy = true;
  }

  pub fn values(&self) -> MovieForm {
    MovieForm::new(
      self.fields[TITLE].value(),
      self.fields[GENRE].value(),
      self.fields[YEAR].value(),
    )
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<FormEvent> {
    if !self.active {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Esc => {
        self.close();
        return KeyResult::Event(FormEvent::Cancelled);
      }
      // One save at a time
      _ if self.busy => return KeyResult::Handled,
      KeyCode::Tab | KeyCode::Down => {
        self.focus = (self.focus + 1) % LABELS.len();
        return KeyResult::Handled;
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.focus = (self.focus + LABELS.len() - 1) % LABELS.len();
        return KeyResult::Handled;
      }
      KeyCode::Enter => return KeyResult::Event(FormEvent::Submitted(self.values())),
      _ => {}
    }

    match self.fields[self.focus].handle_key(key) {
      InputResult::Consumed => {
        self.error = None;
        KeyResult::Handled
      }
      _ => KeyResult::Handled,
    }
  }

  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    let overlay_area = centered(area, 56, 9);
    frame.render_widget(Clear, overlay_area);

    let title = match &self.mode {
      FormMode::Add => " Add movie ".to_string(),
      FormMode::Edit(id) => format!(" Edit movie {} ", id),
    };
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(title);

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines: Vec<Line> = self
      .fields
      .iter()
      .zip(LABELS)
      .enumerate()
      .map(|(i, (field, label))| {
        let focused = i == self.focus && !self.busy;
        let label_style = if focused {
          Style::default().fg(Color::Yellow).bold()
        } else {
          Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::styled(format!("{:>6}: ", label), label_style)];
        spans.extend(field.spans(focused));
        Line::from(spans)
      })
      .collect();

    lines.push(Line::raw(""));
    lines.push(match (&self.error, self.busy) {
      (_, true) => Line::styled("Saving...", Style::default().fg(Color::Cyan)),
      (Some(error), false) => Line::styled(error.as_str(), Style::default().fg(Color::Red)),
      (None, false) => Line::styled(
        "Tab: next field  Enter: save  Esc: cancel",
        Style::default().fg(Color::DarkGray),
      ),
    });

    frame.render_widget(Paragraph::new(lines), inner);
  }
}
