use std::fmt;
use std::io;
use std::path::PathBuf;

/// Stable codes for every failure `hp` can report.
///
/// `E1xxx` covers configuration, `E2xxx` input documents and `E9xxx`
/// everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ConfigReadFailed,
    InputNotFound,
    InputParseError,
    InternalUnexpected,
}

impl ErrorCode {
    /// The `E####` identifier.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::ConfigReadFailed => "E1003",
            Self::InputNotFound => "E2001",
            Self::InputParseError => "E2002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// One-line summary.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ConfigReadFailed => "Config file could not be read",
            Self::InputNotFound => "Input document not found",
            Self::InputParseError => "Input document is not valid JSON",
            Self::InternalUnexpected => "Unexpected internal failure",
        }
    }

    /// What the caller can do about it, if anything.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .holeplan/config.toml and retry."),
            Self::ConfigReadFailed => Some("Check that the config path exists and is readable."),
            Self::InputNotFound => Some("Pass a path to a holes document, or `-` to read stdin."),
            Self::InputParseError => {
                Some("Expected an object with optional `holes` and `relationships` arrays.")
            }
            Self::InternalUnexpected => {
                Some("Re-run with HOLEPLAN_LOG=debug and report the output.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::ConfigReadFailed,
            Self::Parse { .. } => ErrorCode::ConfigParseError,
        }
    }
}

/// Errors raised while loading an input document.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input document not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse input document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl InputError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::InputNotFound,
            Self::Parse(_) => ErrorCode::InputParseError,
            Self::Io(_) => ErrorCode::InternalUnexpected,
        }
    }
}
