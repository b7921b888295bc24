//! Lookup strategy selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// Strategy selects which index walk resolves an address.
///
/// All strategies return identical records for the same database; they
/// differ only in how much I/O each query performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Two-level search: header table narrows the index, then a single
    /// read of the sub-range.
    #[serde(rename = "b-tree", alias = "btree")]
    BTree,
    /// Binary search over the on-disk index, one read per probe.
    #[serde(rename = "binary")]
    Binary,
    /// Binary search over the whole file loaded into memory.
    #[default]
    #[serde(rename = "memory")]
    Memory,
}

impl Strategy {
    /// All strategies, in a stable order.
    pub const ALL: [Strategy; 3] = [Strategy::BTree, Strategy::Binary, Strategy::Memory];

    /// Get the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::BTree => "b-tree",
            Strategy::Binary => "binary",
            Strategy::Memory => "memory",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "b-tree" | "btree" => Ok(Strategy::BTree),
            "binary" => Ok(Strategy::Binary),
            "memory" => Ok(Strategy::Memory),
            _ => Err(Error::InvalidStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("b-tree".parse::<Strategy>().unwrap(), Strategy::BTree);
        assert_eq!("BTREE".parse::<Strategy>().unwrap(), Strategy::BTree);
        assert_eq!("binary".parse::<Strategy>().unwrap(), Strategy::Binary);
        assert_eq!("Memory".parse::<Strategy>().unwrap(), Strategy::Memory);
        assert!(matches!(
            "hash".parse::<Strategy>(),
            Err(Error::InvalidStrategy(_))
        ));
    }

    #[test]
    fn test_strategy_default_is_memory() {
        assert_eq!(Strategy::default(), Strategy::Memory);
    }

    #[test]
    fn test_strategy_display() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!(Strategy::BTree.to_string(), "b-tree");
    }

    #[test]
    fn test_strategy_serde_names() {
        assert_eq!(serde_json::to_string(&Strategy::BTree).unwrap(), "\"b-tree\"");
        let parsed: Strategy = serde_json::from_str("\"binary\"").unwrap();
        assert_eq!(parsed, Strategy::Binary);
    }
}
