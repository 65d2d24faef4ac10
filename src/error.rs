//! Command Line Error Types

use derive_more::{Display, Error};
use wallman_catalog::Root;

/// A command line error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for the command line.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load the configuration")]
    Config,
    #[display("could not open the {_0} directory")]
    Open(#[error(not(source))] Root),
    #[display("{_0} failed")]
    Command(#[error(not(source))] &'static str),
    #[display("could not write the report")]
    Output,
}
