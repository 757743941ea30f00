//! Command-line option parsing.
//!
//! A small flag engine: callers register named options (long and/or short
//! aliases) with a typed default, parse the argument vector once, then read
//! the final values through the handles returned at registration. Tokens
//! that are neither options nor option values are collected as positional
//! arguments during the same pass.
//!
//! Both aliases of an option resolve to a single shared value cell, so
//! `-t` and `--tag` mutate the same logical value.
//!
//! # Examples
//!
//! ```
//! use caplog::flags::FlagSet;
//!
//! let mut flags = FlagSet::new();
//! let verbose = flags.register("verbose", "v", false, "Enable verbose output")?;
//! let tags = flags.register("tag", "t", Vec::<String>::new(), "Add tags")?;
//!
//! flags.parse(vec![
//!     "--verbose".to_string(),
//!     "-t".to_string(),
//!     "work".to_string(),
//!     "note".to_string(),
//! ])?;
//!
//! assert!(verbose.value());
//! assert_eq!(tags.value(), vec!["work".to_string()]);
//! assert_eq!(flags.positionals(), ["note".to_string()]);
//! # Ok::<(), caplog::flags::FlagError>(())
//! ```

mod parse;
mod usage;
mod value;

pub use value::{FlagKind, FlagType, FlagValue};

use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;
use thiserror::Error;

/// Errors produced by flag registration and parsing.
///
/// Registration errors (`DuplicateName`, `EmptyName`) indicate a programming
/// mistake; the parse-time variants are user-facing and abort the parse at
/// the first offending token.
#[derive(Debug, Error, PartialEq)]
pub enum FlagError {
    #[error("flag {0:?} is already registered")]
    DuplicateName(String),

    #[error("flag registered without a long or short name")]
    EmptyName,

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("option {0} requires a value")]
    MissingValue(String),

    #[error("invalid boolean value {value:?} for option {name}")]
    InvalidBoolValue { name: String, value: String },

    #[error("invalid numeric value {value:?} for option {name}")]
    InvalidNumber { name: String, value: String },
}

/// Metadata for one registered option.
#[derive(Debug, Clone)]
pub struct FlagDef {
    /// Long alias, used as `--long`. May be empty.
    pub long: String,
    /// Short alias, used as `-s`. May be empty.
    pub short: String,
    /// Help text shown in the usage detail block.
    pub help: String,
    /// Value kind, fixed by the registration default.
    pub kind: FlagKind,
}

type Cell = Rc<RefCell<FlagValue>>;

/// Typed handle to one flag's value cell.
///
/// Returned by [`FlagSet::register`]; dereference with [`Flag::value`] after
/// parsing to obtain the final value.
#[derive(Debug)]
pub struct Flag<T> {
    cell: Cell,
    _marker: PhantomData<T>,
}

impl<T> Clone for Flag<T> {
    fn clone(&self) -> Self {
        Flag {
            cell: Rc::clone(&self.cell),
            _marker: PhantomData,
        }
    }
}

impl<T: FlagType> Flag<T> {
    /// Reads the current value of the flag.
    ///
    /// Before parsing this is the registration default; afterwards it is the
    /// last value written (or, for the repeatable kind, everything
    /// accumulated in command-line order).
    pub fn value(&self) -> T {
        // The cell's variant is fixed at registration, so the conversion
        // cannot observe a foreign kind.
        T::from_value(&self.cell.borrow()).unwrap_or_default()
    }
}

/// A set of registered options plus the parse state for one argument vector.
///
/// Construct one per invocation, register all options, call
/// [`FlagSet::parse`] exactly once, then read values and
/// [`FlagSet::positionals`].
#[derive(Default)]
pub struct FlagSet {
    defs: Vec<FlagDef>,
    cells: HashMap<String, Cell>,
    positionals: Vec<String>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an option under its long and/or short name and returns a
    /// typed handle to its value cell.
    ///
    /// A one-character long name is treated as the short name, so
    /// `register("b", "b", ..)` registers a short-only flag. When both
    /// names are equal only one is kept. Both
    /// aliases share one value cell.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::DuplicateName`] if either name is already
    /// registered, or [`FlagError::EmptyName`] if both names are empty.
    pub fn register<T: FlagType>(
        &mut self,
        long: &str,
        short: &str,
        default: T,
        help: &str,
    ) -> Result<Flag<T>, FlagError> {
        let (mut long, mut short) = (long.to_string(), short.to_string());
        if long == short {
            short.clear();
        }
        if long.chars().count() == 1 {
            short = std::mem::take(&mut long);
        }
        if long.is_empty() && short.is_empty() {
            return Err(FlagError::EmptyName);
        }

        for name in [&long, &short] {
            if !name.is_empty() && self.cells.contains_key(name.as_str()) {
                return Err(FlagError::DuplicateName(name.clone()));
            }
        }

        let cell: Cell = Rc::new(RefCell::new(default.into_value()));
        let kind = cell.borrow().kind();
        for name in [&long, &short] {
            if !name.is_empty() {
                self.cells.insert(name.clone(), Rc::clone(&cell));
            }
        }

        self.defs.push(FlagDef {
            long,
            short,
            help: help.to_string(),
            kind,
        });

        Ok(Flag {
            cell,
            _marker: PhantomData,
        })
    }

    /// Looks up the definition for a long or short name.
    pub fn lookup(&self, name: &str) -> Option<&FlagDef> {
        self.defs
            .iter()
            .find(|def| def.long == name || def.short == name)
    }

    /// Positional arguments in original order, populated by
    /// [`FlagSet::parse`].
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    fn defs(&self) -> &[FlagDef] {
        &self.defs
    }
}
