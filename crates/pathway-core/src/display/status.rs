//! One-line status messages for operations without a richer result.

use std::fmt;

/// A success line, e.g. `Success: Moved roadmap 3 up`.
///
/// Failures travel as errors and are never rendered through this type.
pub struct OperationStatus {
    pub message: String,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Success: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let moved = OperationStatus::success("Moved roadmap 3 up".to_string());
        assert_eq!(moved.to_string(), "Success: Moved roadmap 3 up\n");
    }
}
