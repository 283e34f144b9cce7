//! Output and subject naming

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subjects for logical message routing
///
/// Even with tokio channels, we use logical subject names for:
/// - Clear message categorization
/// - Debugging and logging
pub struct Subjects;

impl Subjects {
    /// Messages that passed the filter
    pub const FORWARD: &'static str = "delta.forward";

    /// Messages suppressed by the filter
    pub const REJECTED: &'static str = "delta.rejected";

    /// Node status changes (out of band, never carries messages)
    pub const STATUS: &'static str = "delta.status";

    /// Output of a specific node: `delta.{node_id}.forward`
    pub fn node_output(node_id: &str, output: Output) -> String {
        format!("delta.{}.{}", node_id, output.name())
    }
}

/// The two outputs of a filter node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    Forward,
    Rejected,
}

impl Output {
    /// Position in the node's output list
    pub fn index(&self) -> usize {
        match self {
            Output::Forward => 0,
            Output::Rejected => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Output::Forward => "forward",
            Output::Rejected => "rejected",
        }
    }

    pub fn subject(&self) -> &'static str {
        match self {
            Output::Forward => Subjects::FORWARD,
            Output::Rejected => Subjects::REJECTED,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subjects() {
        assert_eq!(Output::Forward.subject(), "delta.forward");
        assert_eq!(Output::Rejected.subject(), "delta.rejected");
        assert_eq!(
            Subjects::node_output("n1", Output::Rejected),
            "delta.n1.rejected"
        );
    }

    #[test]
    fn test_output_order() {
        assert_eq!(Output::Forward.index(), 0);
        assert_eq!(Output::Rejected.index(), 1);
        assert_eq!(serde_json::to_string(&Output::Rejected).unwrap(), "\"rejected\"");
    }
}
