//! Command-line entry point glue.
//!
//! Registers caplog's options against the flag engine, parses the argument
//! vector and dispatches: print the repository directory, update
//! configuration, or write a journal entry (from the positional argument or
//! the editor capture step). Stream and exit-code decisions live here and
//! in `main`, not in the flag engine.

use crate::config::{self, Config};
use crate::editor;
use crate::errors::{AppError, AppResult};
use crate::flags::FlagSet;
use crate::journal::{self, Log, Meta};
use chrono::Local;
use std::collections::BTreeMap;
use tracing::debug;

const PROGRAM: &str = "caplog";

/// Runs one caplog invocation over `args` (argv without the program name).
pub fn run(config: &Config, args: Vec<String>) -> AppResult<()> {
    let mut flags = FlagSet::new();
    let set_config = flags.register(
        "config",
        "c",
        false,
        "Change config setting with key and value",
    )?;
    let get_dir = flags.register(
        "get-dir",
        "g",
        false,
        "Returns the local repository directory",
    )?;
    let page = flags.register(
        "page",
        "p",
        String::new(),
        "Save log entry to sub-directory (=page)",
    )?;
    let tags = flags.register("tag", "t", Vec::<String>::new(), "Add tags to log entry")?;
    let help = flags.register("help", "h", false, "Show this help message")?;

    if let Err(e) = flags.parse(args) {
        let (summary, _) = flags.render_usage(PROGRAM);
        eprintln!("{}", summary);
        return Err(e.into());
    }

    if help.value() {
        let (summary, detail) = flags.render_usage(PROGRAM);
        println!("{}", summary);
        print!("{}", detail);
        return Ok(());
    }

    if get_dir.value() {
        println!("{}", config.local_repository.display());
        return Ok(());
    }

    if set_config.value() {
        return set_config_values(config, flags.positionals());
    }

    write_log(config, flags.positionals(), page.value(), tags.value())
}

/// Positionals are key/value pairs; every key must belong to the closed
/// configuration key set.
fn set_config_values(config: &Config, args: &[String]) -> AppResult<()> {
    if args.is_empty() {
        return Err(AppError::Config("expected 2 arguments, got 0".to_string()));
    }
    if args.len() % 2 != 0 {
        return Err(AppError::Config(format!(
            "expected {} arguments, got {}",
            args.len() + 1,
            args.len()
        )));
    }

    let mut values = BTreeMap::new();
    for pair in args.chunks(2) {
        let key = &pair[0];
        if !config::is_valid_key(key) {
            return Err(AppError::Config(format!(
                "{} is not a valid configuration key",
                key
            )));
        }
        values.insert(key.clone(), pair[1].clone());
    }

    debug!(count = values.len(), "updating configuration");
    config.write_values(&values)
}

fn write_log(
    config: &Config,
    positionals: &[String],
    page: String,
    tags: Vec<String>,
) -> AppResult<()> {
    if positionals.len() > 1 {
        return Err(AppError::Journal(format!(
            "expected 1 argument, got {}",
            positionals.len()
        )));
    }

    let text = match positionals.first() {
        Some(text) => text.clone(),
        None => editor::capture_input(&config.editor)?,
    };

    let meta = Meta {
        date: Local::now(),
        page: (!page.is_empty()).then_some(page),
    };
    journal::write(config, &Log::new(meta, &text, tags))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_config(home: &std::path::Path) -> Config {
        Config::load(home)
    }

    #[test]
    fn get_dir_short_circuits_before_any_write() {
        let home = tempdir().unwrap();
        let config = test_config(home.path());
        run(&config, vec!["-g".to_string()]).unwrap();
        assert!(!config.local_repository.exists());
    }

    #[test]
    fn set_config_rejects_missing_pairs() {
        let home = tempdir().unwrap();
        let config = test_config(home.path());

        let err = set_config_values(&config, &[]).unwrap_err();
        assert_eq!(err.to_string(), "configuration error: expected 2 arguments, got 0");

        let err = set_config_values(&config, &["editor".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "configuration error: expected 2 arguments, got 1");
    }

    #[test]
    fn set_config_rejects_unknown_key() {
        let home = tempdir().unwrap();
        let config = test_config(home.path());

        let err = set_config_values(
            &config,
            &["not_a_key".to_string(), "value".to_string()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a valid configuration key"));
    }

    #[test]
    fn set_config_writes_valid_pairs() {
        let home = tempdir().unwrap();
        let config = test_config(home.path());

        set_config_values(&config, &["editor".to_string(), "nano".to_string()]).unwrap();
        assert_eq!(Config::load(home.path()).editor, "nano");
    }

    #[test]
    fn write_log_rejects_extra_positionals() {
        let home = tempdir().unwrap();
        let config = test_config(home.path());

        let err = write_log(
            &config,
            &["one".to_string(), "two".to_string()],
            String::new(),
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "expected 1 argument, got 2");
    }

    #[test]
    fn parse_failure_is_surfaced_to_the_caller() {
        let home = tempdir().unwrap();
        let config = test_config(home.path());

        let err = run(&config, vec!["--unknown".to_string()]).unwrap_err();
        assert!(err.to_string().contains("unknown option: unknown"));
    }
}
