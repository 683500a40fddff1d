//! Shared DTOs (schemas-as-code) for the linkfix workspace.
//!
//! # Design constraints
//! - Report types are intended to be serialized to disk.
//! - Prefer adding optional fields over changing semantics.

pub mod edit;
pub mod report;
pub mod rules;

pub use edit::{EditKind, LineClass, LineEdit, RewriteOutcome};
pub use rules::LinkRules;

/// Schema identifiers.
pub mod schema {
    pub const LINKFIX_REPORT_V1: &str = "linkfix.report.v1";
}
