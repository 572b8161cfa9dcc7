//! Error handling utilities for MCP server

use pathway_core::RoadmapError;
use rmcp::ErrorData;

/// Converts a navigator error into an MCP error.
///
/// Errors the caller can act on (unknown ids, full slots, generator
/// failures, a regeneration already running) are reported as invalid
/// params; everything else is internal.
pub fn to_mcp_error(message: &str, error: &RoadmapError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_user_reportable() {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}
