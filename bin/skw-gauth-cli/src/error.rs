use skw_gauth::GAuthError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    GAuth(#[from] GAuthError),
    #[error("can not read: {0}")]
    CredentialFileUnreadable(String),
    #[error("{0}")]
    MissingArgument(&'static str),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
