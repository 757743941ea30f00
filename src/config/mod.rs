//! Configuration management for caplog.
//!
//! Settings live in a TOML file next to the user's home directory:
//! `~/.caplog.toml` is preferred, `~/.config/caplog.toml` is the fallback.
//! A missing or malformed file yields the defaults (editor `vi`, repository
//! `~/.caplog/capbook`); caplog never refuses to start over its own config.
//!
//! The loaded [`Config`] is an explicit value passed down from `main`;
//! there is no process-wide configuration state.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key for the editor command used to capture log entries.
pub const EDITOR_KEY: &str = "editor";
/// Key for the local git repository holding the logbook.
pub const GIT_LOCAL_REPOSITORY_KEY: &str = "git.local_repository";

const DEFAULT_EDITOR: &str = "vi";
const DEFAULT_REPOSITORY: &str = ".caplog/capbook";
const CONFIG_FILENAME: &str = ".caplog.toml";
const XDG_CONFIG_FILENAME: &str = ".config/caplog.toml";

/// Returns true when `key` names a recognized configuration setting.
pub fn is_valid_key(key: &str) -> bool {
    key == EDITOR_KEY || key == GIT_LOCAL_REPOSITORY_KEY
}

/// On-disk representation of the config file. All fields optional so a
/// partial file keeps the defaults for everything it omits.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    editor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    git: Option<GitSection>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct GitSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    local_repository: Option<String>,
}

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Editor command used for the capture step.
    pub editor: String,
    /// Directory of the local git repository holding log entries, with `~`
    /// already expanded.
    pub local_repository: PathBuf,
    config_path: PathBuf,
}

impl Config {
    /// Loads configuration relative to `home`, falling back to defaults for
    /// anything missing or unreadable.
    pub fn load(home: &Path) -> Self {
        let config_path = find_existing_config_file(home);
        let file = read_config_file(&config_path);

        let editor = file
            .editor
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());
        let repository = file
            .git
            .and_then(|git| git.local_repository)
            .unwrap_or_else(|| {
                home.join(DEFAULT_REPOSITORY).to_string_lossy().into_owned()
            });
        let local_repository = PathBuf::from(expand_tilde(&repository, home));

        debug!(config = %config_path.display(), "configuration loaded");
        Config {
            editor,
            local_repository,
            config_path,
        }
    }

    /// Merges the given key/value pairs into the config file and writes it
    /// back, preserving settings that are not being changed.
    ///
    /// Keys not in the recognized set are ignored; the CLI layer validates
    /// them before calling this.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if serialization fails and `AppError::Io`
    /// if the file cannot be written.
    pub fn write_values(&self, values: &BTreeMap<String, String>) -> AppResult<()> {
        let mut file = read_config_file(&self.config_path);

        for (key, value) in values {
            match key.as_str() {
                EDITOR_KEY => file.editor = Some(value.clone()),
                GIT_LOCAL_REPOSITORY_KEY => {
                    file.git
                        .get_or_insert_with(GitSection::default)
                        .local_repository = Some(value.clone());
                }
                _ => {}
            }
        }

        let text = toml::to_string(&file)
            .map_err(|e| AppError::Config(format!("cannot serialize config: {}", e)))?;
        fs::write(&self.config_path, text)?;
        debug!(config = %self.config_path.display(), "configuration written");
        Ok(())
    }

    /// Path of the config file reads and writes go through.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Picks the config file location: `~/.caplog.toml` when present, else
/// `~/.config/caplog.toml` when present, else the former as the path new
/// writes will create.
fn find_existing_config_file(home: &Path) -> PathBuf {
    let primary = home.join(CONFIG_FILENAME);
    if primary.is_file() {
        return primary;
    }
    let xdg = home.join(XDG_CONFIG_FILENAME);
    if xdg.is_file() {
        return xdg;
    }
    primary
}

fn read_config_file(path: &Path) -> ConfigFile {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return ConfigFile::default(),
    };
    match toml::from_str(&text) {
        Ok(file) => file,
        Err(e) => {
            warn!(config = %path.display(), error = %e, "malformed config file, using defaults");
            ConfigFile::default()
        }
    }
}

/// Expands a leading `~` against `home` rather than the process
/// environment, keeping path handling testable.
fn expand_tilde(path: &str, home: &Path) -> String {
    shellexpand::tilde_with_context(path, || home.to_str().map(str::to_string)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(home: &Path, relative: &str, content: &str) {
        let path = home.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn find_config_defaults_to_home_dotfile() {
        let home = tempdir().unwrap();
        assert_eq!(
            find_existing_config_file(home.path()),
            home.path().join(".caplog.toml")
        );
    }

    #[test]
    fn find_config_prefers_home_dotfile_over_xdg() {
        let home = tempdir().unwrap();
        write_config(home.path(), ".config/caplog.toml", "");
        assert_eq!(
            find_existing_config_file(home.path()),
            home.path().join(".config/caplog.toml")
        );

        write_config(home.path(), ".caplog.toml", "");
        assert_eq!(
            find_existing_config_file(home.path()),
            home.path().join(".caplog.toml")
        );
    }

    #[test]
    fn load_uses_defaults_when_no_file_exists() {
        let home = tempdir().unwrap();
        let config = Config::load(home.path());
        assert_eq!(config.editor, "vi");
        assert_eq!(
            config.local_repository,
            home.path().join(".caplog/capbook")
        );
    }

    #[test]
    fn load_reads_editor_from_file() {
        let home = tempdir().unwrap();
        write_config(home.path(), ".caplog.toml", "editor = 'vim'\n");
        let config = Config::load(home.path());
        assert_eq!(config.editor, "vim");
        assert_eq!(
            config.local_repository,
            home.path().join(".caplog/capbook")
        );
    }

    #[test]
    fn load_falls_back_to_defaults_on_malformed_toml() {
        let home = tempdir().unwrap();
        write_config(home.path(), ".caplog.toml", "faulty_toml'_'");
        let config = Config::load(home.path());
        assert_eq!(config.editor, "vi");
    }

    #[test]
    fn load_expands_tilde_in_repository_path() {
        let home = tempdir().unwrap();
        write_config(
            home.path(),
            ".caplog.toml",
            "editor = 'vim'\n[git]\nlocal_repository = '~/test'\n",
        );
        let config = Config::load(home.path());
        assert_eq!(config.local_repository, home.path().join("test"));
    }

    #[test]
    fn write_values_merges_into_existing_file() {
        let home = tempdir().unwrap();
        write_config(home.path(), ".caplog.toml", "editor = 'vim'\n");
        let config = Config::load(home.path());

        let mut values = BTreeMap::new();
        values.insert(
            GIT_LOCAL_REPOSITORY_KEY.to_string(),
            "~/elsewhere".to_string(),
        );
        config.write_values(&values).unwrap();

        let reloaded = Config::load(home.path());
        assert_eq!(reloaded.editor, "vim");
        assert_eq!(reloaded.local_repository, home.path().join("elsewhere"));
    }

    #[test]
    fn write_values_ignores_unknown_keys() {
        let home = tempdir().unwrap();
        let config = Config::load(home.path());

        let mut values = BTreeMap::new();
        values.insert("not_a_correct_key".to_string(), "_".to_string());
        values.insert(EDITOR_KEY.to_string(), "nano".to_string());
        config.write_values(&values).unwrap();

        let text = fs::read_to_string(config.config_path()).unwrap();
        assert!(text.contains("editor"));
        assert!(!text.contains("not_a_correct_key"));
    }

    #[test]
    fn valid_key_set_is_closed() {
        assert!(is_valid_key(EDITOR_KEY));
        assert!(is_valid_key(GIT_LOCAL_REPOSITORY_KEY));
        assert!(!is_valid_key("git"));
        assert!(!is_valid_key(""));
    }
}
