mod command_input;
mod confirm_dialog;
mod input;
mod movie_form;
mod search_input;

pub use command_input::{CommandEvent, CommandInput};
pub use confirm_dialog::{ConfirmDialog, ConfirmEvent};
pub use input::{InputResult, TextInput};
pub use movie_form::{FormEvent, FormMode, MovieFormDialog};
pub use search_input::{SearchEvent, SearchInput};

/// Outcome of offering a key to a component.
///
/// Components return this to their parent so the parent knows whether to
/// keep looking for a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult<T> {
  /// Key was consumed, nothing for the parent to do
  Handled,
  /// Key was consumed and produced an event for the parent
  Event(T),
  /// Key was not consumed, parent should try next handler
  NotHandled,
}
