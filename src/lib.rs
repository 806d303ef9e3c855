//! Library surface for the panic-audit tool.
//!
//! Exposes manifest discovery and the task implementations so the audit
//! logic can be linked and driven from another context without going
//! through the binary entry point.

pub mod manifest;
pub mod tasks;
