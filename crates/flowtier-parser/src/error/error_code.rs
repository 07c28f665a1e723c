//! Error codes for the Flowtier diagnostic system.
//!
//! Codes are grouped by the stage that emits them:
//! - `E1xx` - Parsing
//! - `E2xx` - Graph building
//! - `E3xx` - Level assignment

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Parsing (E1xx)
    // =========================================================================
    /// Unrecognized line.
    ///
    /// The line is neither a node declaration, an edge, a comment nor the
    /// leading diagram header. It is skipped.
    E100,

    /// Unterminated quoted text.
    ///
    /// A label or actor opened with `"` was never closed. The line is skipped.
    E101,

    /// No nodes.
    ///
    /// The source declares no node at all, so there is nothing to lay out.
    E102,

    /// Actor on a non-task node.
    ///
    /// Only tasks have performers; the annotation is ignored.
    E103,

    // =========================================================================
    // Graph building (E2xx)
    // =========================================================================
    /// Duplicate node id.
    ///
    /// The last declaration wins; the node keeps the position of its first
    /// declaration.
    E200,

    /// Edge endpoint is not a declared node.
    ///
    /// The edge is excluded from traversal and drawn as far as possible.
    E201,

    // =========================================================================
    // Level assignment (E3xx)
    // =========================================================================
    /// No start event.
    ///
    /// Traversal starts from the first declared node instead.
    E300,

    /// Unreachable node.
    ///
    /// The node cannot be reached from the start node and is placed on the
    /// trailing level.
    E301,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unrecognized line",
            ErrorCode::E101 => "unterminated quoted text",
            ErrorCode::E102 => "no nodes",
            ErrorCode::E103 => "actor on non-task node",
            ErrorCode::E200 => "duplicate node id",
            ErrorCode::E201 => "unknown edge endpoint",
            ErrorCode::E300 => "no start event",
            ErrorCode::E301 => "unreachable node",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
