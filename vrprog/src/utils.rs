use strum::{EnumIs, EnumTryAs};
use thiserror::Error;

/// Coarse classification of an [`Error`].
///
/// Callers that only care whether the input was structurally broken, or whether the arity
/// table is incomplete, should match on this rather than on the concrete variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The list, prefix or postfix input does not describe a well-formed program.
    MalformedInput,
    /// A function name has no entry in the arity table.
    UnknownFunction,
    /// The arity policy could not be loaded.
    Config,
}

#[derive(Debug, EnumIs, EnumTryAs, Error)]
pub enum Error {
    /// A program with no node at all has no root.
    #[error("The program is empty: a list, prefix or postfix program must contain at least one node.")]
    EmptyProgram,

    /// A structural input of a list-form node does not point to an earlier position.
    #[error(
        "Node {node} of a program of length {len} references input {input}. Inputs must refer to strictly earlier positions."
    )]
    InvalidInputIndex { node: usize, input: usize, len: usize },

    /// The flat sequence ran out before a node received all of its children.
    #[error(
        "The token sequence ended early: `{function}` expects {expected} input(s) but only {found} could be decoded."
    )]
    UnexpectedEnd {
        function: String,
        expected: usize,
        found: usize,
    },

    /// The root was complete before every token of the flat sequence was consumed.
    #[error(
        "The token sequence has {remaining} token(s) left over after the root program was decoded from {consumed} token(s)."
    )]
    TrailingTokens { consumed: usize, remaining: usize },

    /// The arity table has no entry for this function name.
    #[error("The function `{0}` has no entry in the arity table.")]
    UnknownFunction(String),

    /// An arity policy file could not be read.
    #[error("I/O error while reading `{path}`: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// An arity policy file is not valid TOML for [`ArityPolicy`](crate::arity::ArityPolicy).
    #[error("Failed to parse arity policy `{path}`: {message}")]
    PolicyParse { path: String, message: String },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyProgram
            | Error::InvalidInputIndex { .. }
            | Error::UnexpectedEnd { .. }
            | Error::TrailingTokens { .. } => ErrorKind::MalformedInput,
            Error::UnknownFunction(_) => ErrorKind::UnknownFunction,
            Error::Io { .. } | Error::PolicyParse { .. } => ErrorKind::Config,
        }
    }

    /// Shorthand for `self.kind() == ErrorKind::MalformedInput`.
    pub fn is_malformed_input(&self) -> bool {
        self.kind() == ErrorKind::MalformedInput
    }
}

pub type Result<T> = std::result::Result<T, Error>;
