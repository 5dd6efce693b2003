use thiserror::Error;

/// Errors surfaced by CLI commands (exit code 1).
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Standard input could not be read.
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),
    /// Standard output could not be written.
    #[error("failed to write stdout: {0}")]
    Stdout(#[source] std::io::Error),
    /// Output could not be rendered.
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}
