use std::num::ParseIntError;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Grammar, semantic and structural failures raised while parsing a chart
/// or projecting it into an output format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("invalid start block")]
    InvalidStartBlock,

    #[error("single-line start of block invalid")]
    SingleLineBlockInvalid,

    #[error("empty block found")]
    EmptyBlock,

    #[error("unclosed block at block: {0}")]
    UnclosedBlock(usize),

    #[error("expected start of block")]
    ExpectedStartOfBlock,

    #[error("include nested deeper than {0} levels")]
    IncludeDepthExceeded(usize),

    #[error("invalid palette assignment")]
    InvalidPaletteAssignment,

    #[error("only single characters allowed")]
    OnlySingleCharactersAllowed,

    #[error("character re-used within palette")]
    CharacterReused,

    #[error("pattern not committed")]
    PatternNotCommitted,

    #[error("incorrect stitch mode setting")]
    IncorrectStitchModeSetting,

    #[error("stitching not committed")]
    StitchingNotCommitted,

    #[error("invalid offset")]
    InvalidOffset,

    #[error("offset should be Width[x]Height")]
    OffsetFormatInvalid,

    #[error("{0}")]
    InvalidInteger(#[from] ParseIntError),

    #[error("unknown action")]
    UnknownAction,

    #[error("no pattern")]
    NoPattern,

    #[error("invalid stitch mode")]
    InvalidStitchMode,

    #[error("unknown mode in block")]
    UnknownModeInBlock,

    #[error("uncommitted pattern")]
    UncommittedPattern,

    #[error("no blocks found")]
    NoBlocksFound,

    #[error("no actions, nothing committed?")]
    NoActionsCommitted,

    #[error("symbol unknown")]
    SymbolUnknown,

    #[error("invalid size <= 0")]
    InvalidSize,

    #[error("unable to combine horizontal/vertical line with diagonal line")]
    IncompatibleLineCombination,

    #[error("perform a cross stitch, not 2 different lines")]
    CrossStitchLineConflict,

    #[error("chart of size {0} too large to render")]
    ChartTooLarge(usize),
}

/// Main error type for stitch operations
#[derive(Error, Diagnostic, Debug)]
pub enum StitchError {
    #[error("parsing: {kind}")]
    #[diagnostic(code(stitch::parse))]
    Parse {
        kind: ParseErrorKind,
        backtrace: Vec<String>,
    },

    /// Include read failures keep the underlying message untouched.
    #[error("{source}")]
    #[diagnostic(code(stitch::include))]
    Include {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        backtrace: Vec<String>,
    },

    #[error("options: {message}")]
    #[diagnostic(code(stitch::options), help("options are given as key=value, e.g. ascii-no-delimiter=true"))]
    Options { message: String },

    #[error("unknown format: {0}")]
    #[diagnostic(code(stitch::format), help("supported formats are ascii and html"))]
    UnknownFormat(String),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(stitch::io))]
    Io { path: PathBuf, message: String },

    #[error("Config error: {message}")]
    #[diagnostic(code(stitch::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("template error: {0}")]
    #[diagnostic(code(stitch::template))]
    Template(#[from] minijinja::Error),
}

impl StitchError {
    /// A parse error with the raw lines that caused it.
    pub fn parse(kind: ParseErrorKind, backtrace: &[String]) -> Self {
        Self::Parse {
            kind,
            backtrace: backtrace.to_vec(),
        }
    }

    /// A parse-style error with no backtrace (used for render conflicts).
    pub fn bare(kind: ParseErrorKind) -> Self {
        Self::Parse {
            kind,
            backtrace: Vec::new(),
        }
    }

    pub fn options(message: impl Into<String>) -> Self {
        Self::Options {
            message: message.into(),
        }
    }

    /// The parse kind, if this is a parse error.
    pub fn kind(&self) -> Option<&ParseErrorKind> {
        match self {
            Self::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Raw input lines implicated in the failure.
    pub fn backtrace(&self) -> &[String] {
        match self {
            Self::Parse { backtrace, .. } | Self::Include { backtrace, .. } => backtrace,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, StitchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = StitchError::bare(ParseErrorKind::NoBlocksFound);
        assert_eq!(err.to_string(), "parsing: no blocks found");
        assert!(err.backtrace().is_empty());
    }

    #[test]
    fn test_unclosed_block_reports_depth() {
        let err = StitchError::parse(ParseErrorKind::UnclosedBlock(1), &["a => {".to_string()]);
        assert_eq!(err.to_string(), "parsing: unclosed block at block: 1");
        assert_eq!(err.backtrace(), ["a => {".to_string()]);
    }

    #[test]
    fn test_integer_error_is_verbatim() {
        let source = "q".parse::<i32>().unwrap_err();
        let expected = source.to_string();
        let kind = ParseErrorKind::from(source);
        assert_eq!(kind.to_string(), expected);
    }

    #[test]
    fn test_include_error_is_verbatim() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let err = StitchError::Include {
            path: PathBuf::from("missing.txt"),
            source,
            backtrace: vec!["missing.txt".to_string()],
        };
        assert_eq!(err.to_string(), "No such file");
        assert_eq!(err.backtrace().len(), 1);
        assert!(err.kind().is_none());
    }
}
