//! Configuration file loading.
//!
//! The configuration is a JSON object:
//!
//! ```json
//! {
//!   "max_depth": 40,
//!   "templates": { "Row": "<tr><td>{{{1}}}</td></tr>" }
//! }
//! ```
//!
//! Both keys are optional.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Default limit on nested template expansion.
pub const DEFAULT_MAX_DEPTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Template bodies by name.
    pub templates: BTreeMap<String, String>,
    /// How deeply templates may call templates.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates: BTreeMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Parse configuration from JSON text. `path` is only used in errors.
    pub fn from_json(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            // serde_json appends the position, which the error carries separately.
            let detail = e.to_string();
            let detail = detail
                .rsplit_once(" at line ")
                .map_or(detail.as_str(), |(message, _)| message);
            Error::in_file(format!("invalid configuration: {}", detail), path)
                .with_position(e.line(), e.column())
        })
    }
}

/// The default configuration file, `<config dir>/wikilist/config.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wikilist").join("config.json"))
}

/// Load configuration from `path`, or from the default location.
///
/// An explicit path must exist. A missing default file gives the built-in
/// defaults.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => read(path),
        None => match default_path() {
            Some(path) if path.exists() => read(&path),
            _ => {
                debug!("no configuration file; using defaults");
                Ok(Config::default())
            }
        },
    }
}

fn read(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "loading configuration");
    let text = fs::read_to_string(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::NotFound => "configuration file not found".to_string(),
            _ => format!("cannot read configuration: {}", e),
        };
        Error::in_file(message, path)
    })?;
    Config::from_json(&text, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::from_json("{}", Path::new("c.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn templates_and_depth() {
        let config = Config::from_json(
            r#"{"max_depth": 5, "templates": {"Row": "[{{{1}}}]"}}"#,
            Path::new("c.json"),
        )
        .unwrap();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.templates["Row"], "[{{{1}}}]");
    }

    #[test]
    fn malformed_json_reports_line() {
        let err = Config::from_json("{\n  \"max_depth\": x\n}", Path::new("c.json")).unwrap_err();
        assert_eq!(err.position.line, Some(2));
        let text = err.to_string();
        assert!(text.contains("c.json"));
        assert_eq!(text.matches("line 2").count(), 1);
    }

    #[test]
    fn unknown_key_is_an_error() {
        assert!(Config::from_json(r#"{"depth": 3}"#, Path::new("c.json")).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/wikilist.json"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration file not found in /nonexistent/wikilist.json"
        );
    }
}
