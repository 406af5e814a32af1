use crate::commands::CommandKind;
use crate::movies::{Movie, MovieForm, MovieId, MovieStore, StoreError};
use crate::notification::Notification;
use crate::sync::{ListContent, ListSyncClient, LoadStatus, Mutation, MutationFuture, NO_RESULTS_MESSAGE};
use crate::task::{Task, TaskPoll};
use crate::ui::components::{
  ConfirmDialog, ConfirmEvent, FormEvent, FormMode, KeyResult, MovieFormDialog, SearchEvent,
  SearchInput,
};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::truncate;
use crate::ui::view::{ShortcutInfo, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use tracing::{error, warn};

const BUSY_MESSAGE: &str = "Another change is still being saved.";

type FetchResult = Result<Vec<Movie>, StoreError>;

fn lost_task() -> StoreError {
  StoreError::Network("request task ended unexpectedly".to_string())
}

/// A change in flight
struct PendingMutation {
  kind: Mutation,
  /// Form that submitted it; deletes have none
  origin: Option<FormMode>,
  task: Task<Result<(), StoreError>>,
}

/// The movie list with its search box, add/edit form and delete dialog
pub struct MovieListView<S: MovieStore> {
  sync: ListSyncClient<S>,
  load: Option<Task<FetchResult>>,
  mutation: Option<PendingMutation>,
  list_state: ListState,
  search: SearchInput,
  form: MovieFormDialog,
  confirm: ConfirmDialog<MovieId>,
  notification: Option<Notification>,
}

impl<S: MovieStore> MovieListView<S> {
  /// Create the view and start the initial load
  pub fn new(store: S) -> Self {
    let mut view = Self {
      sync: ListSyncClient::new(store),
      load: None,
      mutation: None,
      list_state: ListState::default(),
      search: SearchInput::new(),
      form: MovieFormDialog::new(),
      confirm: ConfirmDialog::new(),
      notification: None,
    };
    view.refresh();
    view
  }

  pub fn sync(&self) -> &ListSyncClient<S> {
    &self.sync
  }

  pub fn query(&self) -> &str {
    self.search.query()
  }

  pub fn notification(&self) -> Option<&Notification> {
    self.notification.as_ref()
  }

  /// Whether a request is still outstanding
  pub fn is_busy(&self) -> bool {
    self.load.is_some() || self.mutation.is_some()
  }

  /// True while an overlay owns the keyboard
  pub fn captures_input(&self) -> bool {
    self.search.is_active() || self.form.is_active() || self.confirm.is_active()
  }

  /// Refetch the collection. A load already in flight is superseded.
  pub fn refresh(&mut self) {
    let fetch = self.sync.begin_load();
    self.load = Some(Task::spawn(fetch));
  }

  pub fn notify(&mut self, notification: Notification) {
    self.notification = Some(notification);
  }

  /// The highlighted row. Nothing is selectable unless rows are on screen.
  fn selected_movie(&self) -> Option<Movie> {
    let idx = self.list_state.selected()?;
    match self.sync.content(self.search.query()) {
      ListContent::Rows(rows) => rows.get(idx).map(|m| (*m).clone()),
      _ => None,
    }
  }

  fn clamp_selection(&mut self) {
    let len = match self.sync.content(self.search.query()) {
      ListContent::Rows(rows) => rows.len(),
      _ => 0,
    };
    ensure_valid_selection(&mut self.list_state, len);
  }

  fn open_edit(&mut self) {
    match self.selected_movie() {
      Some(movie) => self.form.open_edit(&movie),
      None => self.notify(Notification::info("No movie selected.")),
    }
  }

  fn ask_delete(&mut self) {
    match self.selected_movie() {
      Some(movie) => self
        .confirm
        .ask(format!("Delete \"{}\"?", movie.title), movie.id),
      None => self.notify(Notification::info("No movie selected.")),
    }
  }

  fn submit_form(&mut self, input: MovieForm) {
    if self.mutation.is_some() {
      self.form.set_error(BUSY_MESSAGE);
      return;
    }

    let (mutation, request) = match self.form.mode().clone() {
      FormMode::Add => (Mutation::Create, self.sync.create_request(&input)),
      FormMode::Edit(id) => (Mutation::Update, self.sync.update_request(&id, &input)),
    };

    match request {
      Ok(request) => {
        self.form.set_busy();
        let origin = self.form.mode().clone();
        self.start_mutation(mutation, Some(origin), request);
      }
      Err(e) => {
        warn!(error = %e, "rejected movie form");
        let message = mutation.validation_message();
        self.form.set_error(message);
        self.notify(Notification::error(message));
      }
    }
  }

  fn delete(&mut self, id: MovieId) {
    if self.mutation.is_some() {
      self.notify(Notification::error(BUSY_MESSAGE));
      return;
    }
    let request = self.sync.delete_request(&id);
    self.start_mutation(Mutation::Delete, None, request);
  }

  fn start_mutation(&mut self, kind: Mutation, origin: Option<FormMode>, request: MutationFuture) {
    self.mutation = Some(PendingMutation {
      kind,
      origin,
      task: Task::spawn(request),
    });
  }

  fn finish_mutation(&mut self, pending: PendingMutation, result: Result<(), StoreError>) {
    let mutation = pending.kind;
    // A form opened since the submit belongs to a different change
    let owns_form = pending
      .origin
      .as_ref()
      .is_some_and(|mode| self.form.mode() == mode);

    match result {
      Ok(()) => {
        self.notify(Notification::success(mutation.success_message()));
        if owns_form && self.form.is_busy() {
          self.form.reset();
          self.form.close();
        } else if owns_form && !self.form.is_active() {
          self.form.reset();
        }
        self.refresh();
      }
      Err(e) => {
        error!(?mutation, error = %e, "mutation failed");
        let message = mutation.failure_message();
        if owns_form && self.form.is_busy() {
          self.form.set_error(message);
        }
        self.notify(Notification::error(message));
      }
    }
  }

  /// Collect finished requests. Returns true if anything changed.
  pub fn tick(&mut self) -> bool {
    let mut changed = false;

    let fetched = match &mut self.load {
      Some(task) => match task.poll() {
        TaskPoll::Pending => None,
        TaskPoll::Ready(result) => Some(result),
        TaskPoll::Lost => Some(Err(lost_task())),
      },
      None => None,
    };
    if let Some(result) = fetched {
      self.load = None;
      // Failures are shown by the list placeholder
      let _ = self.sync.apply_fetch(result);
      self.clamp_selection();
      changed = true;
    }

    let finished = match &mut self.mutation {
      Some(pending) => match pending.task.poll() {
        TaskPoll::Pending => None,
        TaskPoll::Ready(result) => Some(result),
        TaskPoll::Lost => Some(Err(lost_task())),
      },
      None => None,
    };
    if let Some(result) = finished {
      if let Some(pending) = self.mutation.take() {
        self.finish_mutation(pending, result);
      }
      changed = true;
    }

    changed
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match self.confirm.handle_key(key) {
      KeyResult::Event(ConfirmEvent::Confirmed(id)) => {
        self.delete(id);
        return ViewAction::None;
      }
      KeyResult::Event(ConfirmEvent::Cancelled) | KeyResult::Handled => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    match self.form.handle_key(key) {
      KeyResult::Event(FormEvent::Submitted(input)) => {
        self.submit_form(input);
        return ViewAction::None;
      }
      KeyResult::Event(FormEvent::Cancelled) | KeyResult::Handled => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    match self.search.handle_key(key) {
      KeyResult::Event(SearchEvent::Changed(_)) => {
        self.list_state.select(Some(0));
        self.clamp_selection();
        return ViewAction::None;
      }
      KeyResult::Event(SearchEvent::Submitted) | KeyResult::Handled => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.list_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.list_state.select_previous(),
      KeyCode::Char('g') | KeyCode::Home => self.list_state.select_first(),
      KeyCode::Char('G') | KeyCode::End => self.list_state.select_last(),
      KeyCode::Char('a') => self.form.open_add(),
      KeyCode::Char('e') | KeyCode::Enter => self.open_edit(),
      KeyCode::Char('d') | KeyCode::Delete => self.ask_delete(),
      KeyCode::Char('r') => self.refresh(),
      KeyCode::Esc => self.search.clear(),
      KeyCode::Char('q') => return ViewAction::Quit,
      _ => {}
    }
    self.clamp_selection();
    ViewAction::None
  }

  pub fn run_command(&mut self, command: CommandKind) -> ViewAction {
    match command {
      CommandKind::Add => self.form.open_add(),
      CommandKind::Refresh => self.refresh(),
      CommandKind::Search => self.search.activate(),
      CommandKind::ClearFilter => self.search.clear(),
      CommandKind::Quit => return ViewAction::Quit,
    }
    ViewAction::None
  }

  pub fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("a", "add").with_priority(10),
      ShortcutInfo::new("e", "edit").with_priority(20),
      ShortcutInfo::new("d", "delete").with_priority(30),
      ShortcutInfo::new("/", "search").with_priority(40),
      ShortcutInfo::new("r", "refresh").with_priority(50),
      ShortcutInfo::new(":", "command").with_priority(60),
      ShortcutInfo::new("q", "quit").with_priority(70),
    ]
  }

  fn title(&self, shown: usize) -> String {
    let total = self.sync.cache().len();
    let query = self.search.query().trim();
    match self.sync.status() {
      LoadStatus::LoadFailed(e) => format!(" Movies (error: {}) ", truncate(e, 48)),
      LoadStatus::Idle | LoadStatus::Loading => format!(" Movies ({}) (loading...) ", total),
      LoadStatus::Loaded if query.is_empty() => format!(" Movies ({}) ", total),
      LoadStatus::Loaded => format!(" Movies ({} of {}) [/{}] ", shown, total, query),
    }
  }

  pub fn render(&mut self, frame: &mut Frame, area: Rect) {
    let shown = self.sync.filter(self.search.query()).len();
    let block = Block::default()
      .title(self.title(shown))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue))
      .padding(Padding::top(self.search.overlay_height()));

    let placeholder = |text: &str, color: Color| {
      Paragraph::new(text.to_string())
        .block(block.clone())
        .style(Style::default().fg(color))
    };

    match self.sync.content(self.search.query()) {
      ListContent::Loading => frame.render_widget(placeholder("Loading movies...", Color::DarkGray), area),
      ListContent::Failed(message) => frame.render_widget(placeholder(message, Color::Red), area),
      ListContent::Empty => frame.render_widget(placeholder(NO_RESULTS_MESSAGE, Color::DarkGray), area),
      ListContent::Rows(rows) => {
        ensure_valid_selection(&mut self.list_state, rows.len());
        let items: Vec<ListItem> = rows.into_iter().map(movie_item).collect();
        let list = List::new(items)
          .block(block.clone())
          .highlight_style(
            Style::default()
              .bg(Color::DarkGray)
              .add_modifier(Modifier::BOLD),
          )
          .highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
      }
    }

    self.search.render_overlay(frame, area, shown);
    self.form.render_overlay(frame, area);
    self.confirm.render_overlay(frame, area);
  }
}

/// `{title} ({year}) - {genre}`, with year and genre dimmed
fn movie_item(movie: &Movie) -> ListItem<'static> {
  ListItem::new(Line::from(vec![
    Span::raw(movie.title.clone()),
    Span::styled(format!(" ({})", movie.year), Style::default().fg(Color::Yellow)),
    Span::styled(format!(" - {}", movie.genre), Style::default().fg(Color::DarkGray)),
  ]))
}
