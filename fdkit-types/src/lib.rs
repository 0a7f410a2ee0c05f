//! Shared DTOs (schemas-as-code) for the fdkit workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk.
//! - Attribute sets and dependencies travel as their canonical strings (`ABC`, `AB->C`).
//! - Prefer adding optional fields over changing semantics.

pub mod report;

/// Schema identifiers.
pub mod schema {
    pub const FDKIT_REPORT_V1: &str = "fdkit.report.v1";
}
