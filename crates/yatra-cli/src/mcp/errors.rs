//! Error handling utilities for MCP server

use rmcp::ErrorData;
use yatra_core::YatraError;

/// Converts a companion error into an MCP error.
///
/// Input problems become `invalid_params` so the client can correct the call;
/// everything else is reported as an internal error.
pub fn to_mcp_error(message: &str, error: &YatraError) -> ErrorData {
    match error {
        YatraError::Validation { .. } | YatraError::LocationNotFound { .. } => {
            ErrorData::invalid_params(format!("{message}: {error}"), None)
        }
        _ => ErrorData::internal_error(format!("{message}: {error}"), None),
    }
}
