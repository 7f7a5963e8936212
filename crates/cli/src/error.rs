//! Failures of a `driftfield` invocation and the exit status each maps to.
//!
//! | status | meaning                                                          |
//! |--------|------------------------------------------------------------------|
//! | 0      | frame rendered, or listing/schema printed                        |
//! | 2      | clap rejected the arguments (before `run` is reached)            |
//! | 10     | the field could not be built: unknown preset, unusable viewport  |
//! | 11     | reading a scene file or writing the PNG failed                   |
//! | 12     | the user supplied something malformed or out of range            |
//! | 13     | a result could not be serialized to JSON                         |

use driftfield_core::FieldError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// The preset or viewport cannot produce a particle field.
    Sim(FieldError),
    /// Scene file or PNG I/O.
    Io(String),
    /// Bad `--params`, `--background`, scene contents, or a config that
    /// fails validation.
    Input(String),
    /// JSON output failed.
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sim(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Sim(e) => fmt::Display::fmt(e, f),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                f.write_str(msg)
            }
        }
    }
}

/// I/O failures keep their own status; config, color, and palette problems
/// are the user's input rather than a simulation fault.
impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            e @ (FieldError::InvalidConfig(_)
            | FieldError::InvalidColor(_)
            | FieldError::InvalidPalette(_)) => CliError::Input(e.to_string()),
            other => CliError::Sim(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
