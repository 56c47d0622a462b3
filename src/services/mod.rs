//! Core services for traversal, visitation, aggregation, and output

pub mod errorlog;
pub mod permissions;
pub mod sink;
pub mod size;
pub mod source;
pub mod visitors;
pub mod walker;
