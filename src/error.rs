//! Centralized error handling for fastfetch

use std::fmt;
use std::io;

/// Error type for detection, configuration and startup failures
#[derive(Debug)]
pub enum FastfetchError {
    /// I/O errors (file reading, command execution, writing output)
    Io(io::Error),
    /// Parsing errors (invalid data format)
    Parse(String),
    /// Configuration file errors
    Config(String),
    /// System detection errors
    Detection(String),
    /// A constructed path would exceed the platform path limit
    PathTooLong { len: usize, max: usize },
}

impl fmt::Display for FastfetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FastfetchError::Io(err) => write!(f, "I/O error: {}", err),
            FastfetchError::Parse(msg) => write!(f, "Parse error: {}", msg),
            FastfetchError::Config(msg) => write!(f, "Config error: {}", msg),
            FastfetchError::Detection(msg) => write!(f, "{}", msg),
            FastfetchError::PathTooLong { len, max } => {
                write!(f, "path of {} bytes exceeds the limit of {} bytes", len, max)
            }
        }
    }
}

impl std::error::Error for FastfetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FastfetchError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl FastfetchError {
    /// The reader of our output went away, e.g. `fastfetch | head -n 3`
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, FastfetchError::Io(err) if err.kind() == io::ErrorKind::BrokenPipe)
    }
}

impl From<io::Error> for FastfetchError {
    fn from(error: io::Error) -> Self {
        FastfetchError::Io(error)
    }
}

/// Type alias for Results in fastfetch
pub type Result<T> = std::result::Result<T, FastfetchError>;

/// Malformed command line. Each variant maps to its own exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    UnknownOption(String),
    MissingLogo { flag: String },
    MissingColor { flag: String },
    ColorTooLong { len: usize },
    MissingSeparator { flag: String },
    InvalidSeparator { value: String },
    UnknownLogo(String),
}

impl ArgError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ArgError::UnknownOption(_) => 40,
            ArgError::MissingLogo { .. } => 41,
            ArgError::MissingColor { .. } => 42,
            ArgError::ColorTooLong { .. } => 43,
            ArgError::MissingSeparator { .. } => 44,
            ArgError::InvalidSeparator { .. } => 45,
            ArgError::UnknownLogo(_) => 46,
        }
    }
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::UnknownOption(token) => write!(f, "Error: unknown option: {}", token),
            ArgError::MissingLogo { flag } => write!(f, "Error: usage: {} <logo>", flag),
            ArgError::MissingColor { flag } => write!(f, "Error: usage: {} <color>", flag),
            ArgError::ColorTooLong { len } => {
                write!(f, "Error: max color string length is 7, {} given", len)
            }
            ArgError::MissingSeparator { flag } => write!(f, "Error: usage: {} <width>", flag),
            ArgError::InvalidSeparator { value } => {
                write!(f, "Error: couldn't parse {} to i16", value)
            }
            ArgError::UnknownLogo(name) => {
                write!(f, "Error: unknown logo: {} (see --list-logos)", name)
            }
        }
    }
}

impl std::error::Error for ArgError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let errors = [
            ArgError::UnknownOption("--x".into()),
            ArgError::MissingLogo { flag: "-l".into() },
            ArgError::MissingColor { flag: "-c".into() },
            ArgError::ColorTooLong { len: 8 },
            ArgError::MissingSeparator { flag: "-s".into() },
            ArgError::InvalidSeparator { value: "abc".into() },
            ArgError::UnknownLogo("beos".into()),
        ];
        let codes: Vec<u8> = errors.iter().map(ArgError::exit_code).collect();
        assert_eq!(codes, vec![40, 41, 42, 43, 44, 45, 46]);
    }

    #[test]
    fn broken_pipe_is_recognized() {
        let err = FastfetchError::from(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(err.is_broken_pipe());
        assert!(!FastfetchError::from(io::Error::from(io::ErrorKind::NotFound)).is_broken_pipe());
        assert!(!FastfetchError::Detection("No battery found".into()).is_broken_pipe());
    }

    #[test]
    fn unknown_option_names_token() {
        let err = ArgError::UnknownOption("--frobnicate".into());
        assert_eq!(err.to_string(), "Error: unknown option: --frobnicate");
    }
}
