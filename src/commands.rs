/// Command palette entries and autocomplete

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
  Add,
  Refresh,
  Search,
  ClearFilter,
  Quit,
}

#[derive(Debug, Clone)]
pub struct Command {
  pub kind: CommandKind,
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

pub const COMMANDS: &[Command] = &[
  Command {
    kind: CommandKind::Add,
    name: "add",
    aliases: &["a", "new", "create"],
    description: "Add a movie",
  },
  Command {
    kind: CommandKind::Refresh,
    name: "refresh",
    aliases: &["r", "reload"],
    description: "Reload movies from the server",
  },
  Command {
    kind: CommandKind::Search,
    name: "search",
    aliases: &["s", "find", "filter"],
    description: "Filter by title or genre",
  },
  Command {
    kind: CommandKind::ClearFilter,
    name: "clear",
    aliases: &["c", "all"],
    description: "Show all movies",
  },
  Command {
    kind: CommandKind::Quit,
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit reel",
  },
];

/// Autocomplete suggestions for `input`, best match first.
///
/// Ranking: exact name, exact alias, name prefix, alias prefix, name
/// substring, alias substring.
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input_lower = input.trim().to_lowercase();

  if input_lower.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&Command, u32)> = COMMANDS
    .iter()
    .filter_map(|cmd| rank(cmd, &input_lower).map(|r| (cmd, r)))
    .collect();

  // Stable sort keeps table order within a rank
  matches.sort_by_key(|(_, priority)| *priority);

  matches.into_iter().map(|(cmd, _)| cmd).collect()
}

fn rank(cmd: &Command, input: &str) -> Option<u32> {
  if cmd.name == input {
    Some(0)
  } else if cmd.aliases.contains(&input) {
    Some(1)
  } else if cmd.name.starts_with(input) {
    Some(2)
  } else if cmd.aliases.iter().any(|a| a.starts_with(input)) {
    Some(3)
  } else if cmd.name.contains(input) {
    Some(4)
  } else if cmd.aliases.iter().any(|a| a.contains(input)) {
    Some(5)
  } else {
    None
  }
}

/// Resolve typed text to a command, if anything matches
pub fn resolve(input: &str) -> Option<CommandKind> {
  get_suggestions(input).first().map(|cmd| cmd.kind)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_input_returns_all() {
    let suggestions = get_suggestions("");
    assert_eq!(suggestions.len(), COMMANDS.len());
  }

  #[test]
  fn test_exact_match() {
    let suggestions = get_suggestions("refresh");
    assert_eq!(suggestions[0].kind, CommandKind::Refresh);
  }

  #[test]
  fn test_alias_match_beats_prefix() {
    // "a" is an alias of add and a prefix of "all"
    let suggestions = get_suggestions("a");
    assert_eq!(suggestions[0].kind, CommandKind::Add);
  }

  #[test]
  fn test_prefix_match() {
    assert_eq!(resolve("qu"), Some(CommandKind::Quit));
    assert_eq!(resolve("cle"), Some(CommandKind::ClearFilter));
  }

  #[test]
  fn test_substring_match() {
    assert_eq!(resolve("fres"), Some(CommandKind::Refresh));
    assert_eq!(resolve("load"), Some(CommandKind::Refresh));
  }

  #[test]
  fn test_no_match() {
    assert!(get_suggestions("zzz").is_empty());
    assert_eq!(resolve("zzz"), None);
  }
}
