//! Embeddable core library for fdkit.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into other host processes.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`DependencySource`](ports::DependencySource): read dependency text
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`run_analysis`](pipeline::run_analysis): parse, analyse and build a report
//! - [`write_analysis_artifacts`](pipeline::write_analysis_artifacts): persist the report

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

mod convert;

// Re-export the engine so callers don't need fdkit-domain directly.
pub use fdkit_domain::{AttributeSet, DependencySet, FunctionalDependency, ParseError};
