//! The token parsing pass.
//!
//! A single left-to-right walk over the argument vector with no
//! backtracking. Option tokens mutate their value cell; every token that is
//! neither an option nor a consumed option value is recorded as positional
//! in the same pass, so the two classifications cannot fall out of sync.

use super::{FlagError, FlagKind, FlagSet, FlagValue};

impl FlagSet {
    /// Parses the argument vector (excluding the program name).
    ///
    /// Token rules:
    ///
    /// - tokens not starting with a dash (and a lone `-`) are positional;
    /// - a bare `--` ends option parsing, everything after it is positional;
    /// - `--name=value` and `-n=value` carry their value inline;
    /// - boolean flags without an inline value are set to `true` and never
    ///   consume the following token;
    /// - every other kind consumes the next token as its value.
    ///
    /// The first error aborts the pass. Call at most once per `FlagSet`.
    ///
    /// # Errors
    ///
    /// [`FlagError::UnknownOption`] for an unregistered name,
    /// [`FlagError::MissingValue`] when the vector ends where a value was
    /// expected, and [`FlagError::InvalidBoolValue`] /
    /// [`FlagError::InvalidNumber`] for malformed literals.
    pub fn parse(&mut self, args: Vec<String>) -> Result<(), FlagError> {
        let mut rest_only = false;
        let mut i = 0;

        while i < args.len() {
            let token = &args[i];
            i += 1;

            if rest_only || token == "-" || !token.starts_with('-') {
                self.positionals.push(token.clone());
                continue;
            }
            if token == "--" {
                rest_only = true;
                continue;
            }

            let stripped = token.trim_start_matches('-');
            let (name, inline) = match stripped.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (stripped, None),
            };

            let cell = self
                .cell(name)
                .cloned()
                .ok_or_else(|| FlagError::UnknownOption(name.to_string()))?;

            if cell.borrow().kind() == FlagKind::Bool {
                match inline {
                    Some(raw) => cell.borrow_mut().assign(name, raw)?,
                    // The bare form consumes zero following tokens.
                    None => *cell.borrow_mut() = FlagValue::Bool(true),
                }
                continue;
            }

            let raw = match inline {
                Some(raw) => raw.to_string(),
                None => {
                    if i >= args.len() {
                        return Err(FlagError::MissingValue(name.to_string()));
                    }
                    let value = args[i].clone();
                    i += 1;
                    value
                }
            };
            cell.borrow_mut().assign(name, &raw)?;
        }

        Ok(())
    }
}
