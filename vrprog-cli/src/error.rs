use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error on `{path}`: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse JSON file `{path}`: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(serde_json::Error),

    #[error("Question {index} of `{path}`: {source}")]
    Program {
        path: String,
        index: usize,
        source: vrprog::utils::Error,
    },

    #[error(transparent)]
    Vrprog(#[from] vrprog::utils::Error),

    #[error("Chain mode cannot be decoded; use `prefix` or `postfix`.")]
    ChainNotDecodable,
}

pub type CliResult<T> = Result<T, CliError>;
