mod executor;

pub use executor::{Command, parse_command};
