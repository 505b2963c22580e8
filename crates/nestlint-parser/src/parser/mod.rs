//! Tolerant parser over the significant-token stream.

mod state;
mod state_class_members;
mod state_expressions;
mod state_types;

pub mod node_access;

pub use state::parse_source_file;
