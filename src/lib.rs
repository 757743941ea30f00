/*!
caplog captures short journal entries from the command line, appends them to
a git-backed logbook, and pushes the commits to a remote when one is set up.

The crate is organized around a small set of modules:

* [`flags`] parses the command line: option registration, typed values,
  positional collection and usage rendering.
* [`config`] loads and updates the TOML configuration file.
* [`editor`] captures entry text through the user's editor.
* [`journal`] formats entries and writes them into the logbook.
* [`git`] commits written entries and synchronizes with the remote.
* [`cli`] wires the above together for one program invocation.
*/

pub mod cli;
pub mod config;
pub mod editor;
pub mod errors;
pub mod flags;
pub mod git;
pub mod journal;

pub use config::Config;
pub use errors::{AppError, AppResult};
