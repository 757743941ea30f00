//! Usage text rendering.
//!
//! Pure formatting over the registered definitions in registration order:
//! a one-line invocation summary (wrapped to four bracketed groups per line)
//! and a detail block with one line per option, help text aligned on the
//! longest rendered alias pair.

use super::{FlagDef, FlagSet};
use std::fmt::Write;

/// Bracketed groups per summary line before wrapping.
const GROUPS_PER_LINE: usize = 4;

impl FlagDef {
    /// Renders the alias pair, short form first: `-t --tag`, `-t` or
    /// `--tag`.
    fn alias_pair(&self) -> String {
        match (self.short.is_empty(), self.long.is_empty()) {
            (false, false) => format!("-{} --{}", self.short, self.long),
            (false, true) => format!("-{}", self.short),
            (true, false) => format!("--{}", self.long),
            (true, true) => String::new(),
        }
    }
}

impl FlagSet {
    /// Renders the usage summary line and the option detail block for
    /// `program`.
    ///
    /// The summary has one `[-s --long]` group per option in registration
    /// order, continuation lines indented to align under the program name.
    /// The detail block ends each line with a newline; the summary carries
    /// no trailing newline.
    pub fn render_usage(&self, program: &str) -> (String, String) {
        let mut summary = format!("usage: {}", program);
        let indent = summary.len();
        let defs = self.defs();

        for (i, def) in defs.iter().enumerate() {
            let _ = write!(summary, " [{}]", def.alias_pair());
            if (i + 1) % GROUPS_PER_LINE == 0 && i + 1 < defs.len() {
                let _ = write!(summary, "\n{:indent$}", "", indent = indent);
            }
        }

        let width = defs
            .iter()
            .map(|def| def.alias_pair().chars().count())
            .max()
            .unwrap_or(0);

        let mut detail = String::new();
        for def in defs {
            let _ = writeln!(detail, "    {:<width$}    {}", def.alias_pair(), def.help);
        }

        (summary, detail)
    }
}
