use thiserror::Error;

/// Abstracts the types of errors that can occur when reading an alphabet, a rule set or a
/// list of candidate words. None of these are recoverable, a failing build never exposes a
/// partially constructed graph.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("symbol `{0}` is not part of the alphabet")]
    UnknownSymbol(char),
    #[error("alphabet contains symbol `{0}` more than once")]
    DuplicateSymbol(char),
    #[error("malformed rule in line {line}: `{content}`, expected `SOURCE > DEST,DEST,...`")]
    MalformedRule { line: usize, content: String },
    #[error("rule for source `{0}` is defined more than once")]
    DuplicateRule(char),
    #[error("candidate at position {0} is empty")]
    EmptyCandidate(usize),
    #[error("words must consist of at least one symbol")]
    EmptyWord,
    #[error("candidates must be given in a single line, found another one in line {line}")]
    MultilineCandidates { line: usize },
    #[error("alphabet of size {0} requested, but at most {1} symbols are available")]
    AlphabetTooLarge(usize, usize),
    #[error("input is missing the {0} section")]
    MissingSection(&'static str),
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand for results whose error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
