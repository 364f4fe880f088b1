//! Task identifiers linking sliced sub-requests to the task that sliced them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when parsing a task id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed task id [{0}], expected [node_id:id]")]
pub struct TaskIdError(pub String);

/// Identifies a task by the node that runs it and a node-local number.
///
/// Displayed and parsed as `node_id:id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId {
    pub node_id: String,
    pub id: u64,
}

impl TaskId {
    pub fn new(node_id: impl Into<String>, id: u64) -> Self {
        Self {
            node_id: node_id.into(),
            id,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node_id, self.id)
    }
}

impl FromStr for TaskId {
    type Err = TaskIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (node_id, id) = s
            .rsplit_once(':')
            .ok_or_else(|| TaskIdError(s.to_string()))?;
        if node_id.is_empty() {
            return Err(TaskIdError(s.to_string()));
        }
        let id = id.parse::<u64>().map_err(|_| TaskIdError(s.to_string()))?;
        Ok(Self::new(node_id, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let task = TaskId::new("node-1", 42);
        assert_eq!(task.to_string(), "node-1:42");
        assert_eq!("node-1:42".parse::<TaskId>().unwrap(), task);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("node-1".parse::<TaskId>().is_err());
        assert!(":42".parse::<TaskId>().is_err());
        assert!("node-1:abc".parse::<TaskId>().is_err());
    }
}
