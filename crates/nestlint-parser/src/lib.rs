//! TypeScript class and decorator parser for nestlint.
//!
//! This crate provides:
//! - `ast` - Owned syntax tree of imports, classes, members, decorators
//! - `parse_source_file` - Error-tolerant parse of a whole file
//! - Token queries on `SourceFile` used by fixes (`node_access`)

pub mod ast;
pub use ast::*;

pub mod parser;
pub use parser::parse_source_file;

#[cfg(test)]
#[path = "parser/tests/parser_tests.rs"]
mod parser_tests;
#[cfg(test)]
#[path = "parser/tests/node_access_tests.rs"]
mod node_access_tests;
