use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/movies";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  /// Custom title for header (defaults to the API host if not set)
  pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Collection URL, e.g. http://localhost:3000/movies
  #[serde(default = "default_api_url")]
  pub url: String,
  /// Per-request timeout in milliseconds
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: default_api_url(),
      timeout_ms: default_timeout_ms(),
    }
  }
}

fn default_api_url() -> String {
  DEFAULT_API_URL.to_string()
}

fn default_timeout_ms() -> u64 {
  DEFAULT_TIMEOUT_MS
}

impl ApiConfig {
  /// Parse and check the collection URL (http or https only)
  pub fn parsed_url(&self) -> Result<Url> {
    let url =
      Url::parse(&self.url).map_err(|e| eyre!("Invalid API url {:?}: {}", self.url, e))?;
    match url.scheme() {
      "http" | "https" => Ok(url),
      other => Err(eyre!(
        "Unsupported API url scheme {:?} in {}",
        other,
        self.url
      )),
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./reel.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/reel/config.yaml
  ///
  /// Without any file the defaults apply.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("reel.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("reel").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    // An empty file deserializes to null; treat it as all defaults
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  /// Header title: configured title, else the API host
  pub fn display_title(&self) -> String {
    if let Some(title) = &self.title {
      return title.clone();
    }
    self
      .api
      .parsed_url()
      .ok()
      .and_then(|url| {
        let host = url.host_str()?.to_string();
        Some(match url.port() {
          Some(port) => format!("{}:{}", host, port),
          None => host,
        })
      })
      .unwrap_or_else(|| self.api.url.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
  }

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api.url, DEFAULT_API_URL);
    assert_eq!(config.api.timeout_ms, DEFAULT_TIMEOUT_MS);
    assert_eq!(config.display_title(), "localhost:3000");
  }

  #[test]
  fn test_load_explicit_file() {
    let file = write_config(
      "api:\n  url: https://films.example.com/api/movies\n  timeout_ms: 500\ntitle: Films\n",
    );
    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.api.url, "https://films.example.com/api/movies");
    assert_eq!(config.api.timeout_ms, 500);
    assert_eq!(config.display_title(), "Films");
  }

  #[test]
  fn test_partial_file_keeps_defaults() {
    let file = write_config("title: Shelf\n");
    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.api.url, DEFAULT_API_URL);

    let file = write_config("");
    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.api.url, DEFAULT_API_URL);
  }

  #[test]
  fn test_missing_explicit_file() {
    let err = Config::load(Some(Path::new("/nonexistent/reel.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
  }

  #[test]
  fn test_parsed_url_rejects_bad_input() {
    let api = ApiConfig {
      url: "not a url".to_string(),
      ..ApiConfig::default()
    };
    assert!(api.parsed_url().is_err());

    let api = ApiConfig {
      url: "ftp://example.com/movies".to_string(),
      ..ApiConfig::default()
    };
    assert!(api.parsed_url().is_err());
  }

  #[test]
  fn test_display_title_without_port() {
    let config = Config {
      api: ApiConfig {
        url: "https://films.example.com/movies".to_string(),
        ..ApiConfig::default()
      },
      title: None,
    };
    assert_eq!(config.display_title(), "films.example.com");
  }
}
