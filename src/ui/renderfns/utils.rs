/// Truncate to at most `max_len` characters, ending in "..." when cut
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Truncate or right-pad to exactly `width` characters
pub fn fit(s: &str, width: usize) -> String {
  format!("{:<width$}", truncate(s, width), width = width)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("Heat", 10), "Heat");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("Alien", 5), "Alien");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("The Godfather", 8), "The G...");
  }

  #[test]
  fn test_truncate_counts_characters() {
    assert_eq!(truncate("Amélie Poulain", 6), "Amé...");
  }

  #[test]
  fn test_fit_pads() {
    assert_eq!(fit("Dune", 6), "Dune  ");
    assert_eq!(fit("The Godfather", 6), "The...");
  }
}
