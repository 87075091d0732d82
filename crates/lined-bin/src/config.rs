//! Configuration loading for the shell.
//!
//! Reads `lined.toml` from the working directory, falling back to the
//! platform config dir. Unknown fields are ignored and a malformed file
//! degrades to defaults, so an old or hand-edited config never blocks
//! startup.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::warn;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PromptConfig {
    #[serde(default = "PromptConfig::default_text")]
    pub text: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            text: Self::default_text(),
        }
    }
}

impl PromptConfig {
    fn default_text() -> String {
        "lined> ".to_owned()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct HistoryConfig {
    /// History file path; defaults to the platform data dir when absent.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Best-effort config path: working directory first, then the platform
/// config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("lined.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("lined").join("lined.toml");
    }
    PathBuf::from("lined.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<ConfigFile> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(ConfigFile::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(file),
        Err(e) => {
            warn!(target: "config", error = %e, file = %path.display(), "parse_failed_using_defaults");
            Ok(ConfigFile::default())
        }
    }
}

pub fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("lined").join("history"))
        .unwrap_or_else(|| PathBuf::from(".lined_history"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.prompt.text, "lined> ");
        assert!(cfg.history.file.is_none());
    }

    #[test]
    fn parses_prompt_and_history() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[prompt]\ntext = \"$ \"\n[history]\nfile = \"/tmp/h\"\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.prompt.text, "$ ");
        assert_eq!(cfg.history.file, Some(PathBuf::from("/tmp/h")));
    }

    #[test]
    fn malformed_file_degrades_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "prompt = 3 not toml [").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.prompt.text, "lined> ");
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[future]\nshiny = true\n[prompt]\ntext = \"% \"\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.prompt.text, "% ");
    }
}
