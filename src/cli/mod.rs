//! Command-line surface of the `farminv` binary

pub mod args;
pub mod output;
