use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0} candidate(s) could not be validated")]
    FailedCandidates(usize),

    #[error("Database file not found: {0}")]
    DatabaseNotFound(String),
}
