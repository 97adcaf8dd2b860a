//! Markdown formatting of companion results.
//!
//! Result models implement [`std::fmt::Display`] directly (see [`models`]);
//! static reference content is wrapped in small newtypes (see [`reference`])
//! so callers can pick what to show. All output is markdown, rendered to the
//! terminal by the CLI and returned verbatim by the MCP server.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Result Models  │    │ Display impls & │    │    Markdown     │
//! │ (Itinerary, ..) │───▶│ wrapper types   │───▶│ (Terminal/MCP)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`models`]: Display implementations for result models
//! - [`reference`]: Emergency and darshan reference sheets

pub mod models;
pub mod reference;

pub use reference::{DarshanGuide, EmergencySheet};
