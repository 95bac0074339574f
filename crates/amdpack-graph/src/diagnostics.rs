//! Non-fatal findings produced while building and ordering a closure.

use std::fmt;

use serde::Serialize;

use crate::path::PhysicalPath;

/// A dependency id that did not resolve to a file. The edge was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedDependency {
    pub identifier: String,
    pub referenced_from: PhysicalPath,
}

impl fmt::Display for UnresolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unresolved dependency '{}' referenced from {}",
            self.identifier, self.referenced_from
        )
    }
}

/// Nodes the packer emitted without a satisfied dependency order, because
/// no remaining node qualified (a cycle, or an edge leaving the closure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleBreak {
    pub members: Vec<PhysicalPath>,
}

impl fmt::Display for CycleBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "forced flush of {} modules: ", self.members.len())?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", member)?;
        }
        Ok(())
    }
}
