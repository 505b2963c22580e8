//! Common types shared by every nestlint crate.
//!
//! - Byte ranges into source text (`TextRange`)
//! - Line/column conversion (`LineMap`, `Position`, `Range`)
//! - Diagnostics produced by lint rules (`Diagnostic`, `DiagnosticCategory`)

// TextRange - half-open byte ranges
pub mod span;
pub use span::TextRange;

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, Range};

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;
#[cfg(test)]
#[path = "tests/span_tests.rs"]
mod span_tests;
