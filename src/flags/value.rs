//! Typed value cells for the flag engine.
//!
//! Each registered flag owns exactly one `FlagValue`, a tagged variant over
//! the closed set of supported kinds. Parsing a raw token into a cell is a
//! method on the variant itself, so kind-specific behavior (overwrite for
//! scalars, append for the repeatable kind) stays colocated and
//! exhaustiveness-checked.

use super::FlagError;

/// The closed set of value kinds a flag can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    Str,
    Int,
    Int64,
    Uint,
    Uint64,
    Float64,
    /// Repeatable string list; each occurrence on the command line appends.
    Strings,
}

/// The current value of one logical flag, typed per its kind.
///
/// Created from a default at registration time and mutated during parsing.
/// Scalar kinds are last-write-wins; `Strings` accumulates.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Bool(bool),
    Str(String),
    Int(i32),
    Int64(i64),
    Uint(u32),
    Uint64(u64),
    Float64(f64),
    Strings(Vec<String>),
}

impl FlagValue {
    pub fn kind(&self) -> FlagKind {
        match self {
            FlagValue::Bool(_) => FlagKind::Bool,
            FlagValue::Str(_) => FlagKind::Str,
            FlagValue::Int(_) => FlagKind::Int,
            FlagValue::Int64(_) => FlagKind::Int64,
            FlagValue::Uint(_) => FlagKind::Uint,
            FlagValue::Uint64(_) => FlagKind::Uint64,
            FlagValue::Float64(_) => FlagKind::Float64,
            FlagValue::Strings(_) => FlagKind::Strings,
        }
    }

    /// Parses `raw` per this cell's kind and stores the result.
    ///
    /// `name` is the flag name as resolved on the command line, used only
    /// for error diagnostics.
    pub fn assign(&mut self, name: &str, raw: &str) -> Result<(), FlagError> {
        match self {
            FlagValue::Bool(cell) => *cell = parse_bool_literal(name, raw)?,
            FlagValue::Str(cell) => *cell = raw.to_string(),
            FlagValue::Int(cell) => *cell = parse_number(name, raw)?,
            FlagValue::Int64(cell) => *cell = parse_number(name, raw)?,
            FlagValue::Uint(cell) => *cell = parse_number(name, raw)?,
            FlagValue::Uint64(cell) => *cell = parse_number(name, raw)?,
            FlagValue::Float64(cell) => *cell = parse_number(name, raw)?,
            FlagValue::Strings(cell) => cell.push(raw.to_string()),
        }
        Ok(())
    }
}

/// Boolean literals accepted in the `--name=value` form.
fn parse_bool_literal(name: &str, raw: &str) -> Result<bool, FlagError> {
    match raw {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(FlagError::InvalidBoolValue {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, FlagError> {
    raw.parse().map_err(|_| FlagError::InvalidNumber {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// Conversion between Rust types and `FlagValue` variants for the closed
/// kind set. Implemented only for the supported kinds, so `register` is
/// statically limited to them.
pub trait FlagType: Sized + Default {
    fn into_value(self) -> FlagValue;
    fn from_value(value: &FlagValue) -> Option<Self>;
}

impl FlagType for bool {
    fn into_value(self) -> FlagValue {
        FlagValue::Bool(self)
    }
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FlagType for String {
    fn into_value(self) -> FlagValue {
        FlagValue::Str(self)
    }
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FlagType for i32 {
    fn into_value(self) -> FlagValue {
        FlagValue::Int(self)
    }
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FlagType for i64 {
    fn into_value(self) -> FlagValue {
        FlagValue::Int64(self)
    }
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

impl FlagType for u32 {
    fn into_value(self) -> FlagValue {
        FlagValue::Uint(self)
    }
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Uint(v) => Some(*v),
            _ => None,
        }
    }
}

impl FlagType for u64 {
    fn into_value(self) -> FlagValue {
        FlagValue::Uint64(self)
    }
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Uint64(v) => Some(*v),
            _ => None,
        }
    }
}

impl FlagType for f64 {
    fn into_value(self) -> FlagValue {
        FlagValue::Float64(self)
    }
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl FlagType for Vec<String> {
    fn into_value(self) -> FlagValue {
        FlagValue::Strings(self)
    }
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Strings(v) => Some(v.clone()),
            _ => None,
        }
    }
}
