pub mod env;
pub mod error;
pub mod table;
pub mod credentials;
pub mod listing;
pub mod commands;

pub use commands::{ClapArgs, Operation};
pub use error::CliError;
