//! The shared classification every level of the diff tree is tagged with.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
    Modified,
}

impl DiffKind {
    pub fn is_unchanged(self) -> bool {
        matches!(self, DiffKind::Unchanged)
    }
}
