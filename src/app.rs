use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::movies::{HttpMovieStore, MovieStore};
use crate::notification::Notification;
use crate::ui;
use crate::ui::components::{CommandEvent, CommandInput, KeyResult};
use crate::ui::view::ViewAction;
use crate::ui::views::MovieListView;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::{stdout, Stdout};
use std::time::Duration;
use tracing::{info, warn};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Raw mode and the alternate screen, undone on drop so a panic or an
/// early `?` still leaves a usable terminal.
struct TerminalGuard {
  terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
  fn new() -> Result<Self> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(Self { terminal })
  }
}

impl Drop for TerminalGuard {
  fn drop(&mut self) {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = self.terminal.show_cursor();
  }
}

/// Main application state
pub struct App<S: MovieStore> {
  /// Header title
  title: String,

  /// The movie list and its overlays
  view: MovieListView<S>,

  /// `:` command palette
  command_input: CommandInput,

  /// Whether to quit
  should_quit: bool,
}

impl App<HttpMovieStore> {
  pub fn new(config: Config) -> Result<Self> {
    let store = HttpMovieStore::new(&config.api)?;
    info!(url = %store.base_url(), "using movie API");
    Ok(Self::with_store(&config, store))
  }
}

impl<S: MovieStore> App<S> {
  /// Build the app around any store. Starts the initial load, so this
  /// must run inside a tokio runtime.
  pub fn with_store(config: &Config, store: S) -> Self {
    Self {
      title: config.display_title(),
      view: MovieListView::new(store),
      command_input: CommandInput::new(),
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    let mut guard = TerminalGuard::new()?;
    let mut events = EventHandler::new(TICK_RATE);

    while !self.should_quit {
      guard.terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => {
          warn!("terminal event source closed");
          break;
        }
      }
    }

    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Resize => {} // Next draw picks up the new size
      Event::Tick => {
        self.view.tick();
      }
    }
  }

  pub fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // Overlays in the view own the keyboard, so `:` can be typed into them
    if self.command_input.is_active() || !self.view.captures_input() {
      match self.command_input.handle_key(key) {
        KeyResult::Event(CommandEvent::Run(command)) => {
          let action = self.view.run_command(command);
          self.apply(action);
          return;
        }
        KeyResult::Event(CommandEvent::Unknown(text)) => {
          self
            .view
            .notify(Notification::error(format!("Unknown command: {}", text)));
          return;
        }
        KeyResult::Event(CommandEvent::Cancelled) | KeyResult::Handled => return,
        KeyResult::NotHandled => {}
      }
    }

    let action = self.view.handle_key(key);
    self.apply(action);
  }

  fn apply(&mut self, action: ViewAction) {
    match action {
      ViewAction::None => {}
      ViewAction::Quit => self.should_quit = true,
    }
  }

  pub fn should_quit(&self) -> bool {
    self.should_quit
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn view(&self) -> &MovieListView<S> {
    &self.view
  }

  pub fn view_mut(&mut self) -> &mut MovieListView<S> {
    &mut self.view
  }

  pub fn command_input(&self) -> &CommandInput {
    &self.command_input
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::movies::fake::{movie, FakeStore};
  use ratatui::backend::TestBackend;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn type_str(app: &mut App<FakeStore>, s: &str) {
    for c in s.chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
  }

  fn app() -> App<FakeStore> {
    let config = Config {
      title: Some("Local movies".to_string()),
      ..Config::default()
    };
    App::with_store(
      &config,
      FakeStore::with_movies(vec![movie(1, "Dune", 2021, "Sci-Fi")]),
    )
  }

  async fn settle(app: &mut App<FakeStore>) {
    for _ in 0..100 {
      tokio::time::sleep(Duration::from_millis(5)).await;
      app.handle_event(Event::Tick);
      if !app.view().is_busy() {
        return;
      }
    }
    panic!("requests never settled");
  }

  #[tokio::test]
  async fn test_ctrl_c_quits_from_anywhere() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('a')));
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
  }

  #[tokio::test]
  async fn test_quit_command() {
    let mut app = app();
    type_str(&mut app, ":quit");
    assert!(!app.should_quit());
    app.handle_key(key(KeyCode::Enter));
    assert!(app.should_quit());
  }

  #[tokio::test]
  async fn test_unknown_command_notifies() {
    let mut app = app();
    type_str(&mut app, ":zzz");
    app.handle_key(key(KeyCode::Enter));
    let notification = app.view().notification().unwrap();
    assert!(notification.is_error());
    assert_eq!(notification.message, "Unknown command: zzz");
  }

  #[tokio::test]
  async fn test_colon_goes_to_open_form() {
    let mut app = app();
    settle(&mut app).await;
    app.handle_key(key(KeyCode::Char('a')));
    type_str(&mut app, "Dune: Part Two");
    assert!(!app.command_input().is_active());
  }

  #[tokio::test]
  async fn test_draw_full_screen() {
    let mut app = app();
    settle(&mut app).await;

    let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
    terminal.draw(|frame| ui::draw(frame, &mut app)).unwrap();
    let screen: String = terminal
      .backend()
      .buffer()
      .content()
      .iter()
      .map(|cell| cell.symbol())
      .collect();

    assert!(screen.contains("Local movies"));
    assert!(screen.contains("Dune (2021) - Sci-Fi"));
    assert!(screen.contains("/search"));
  }
}
