use serde::{Deserialize, Serialize};

use super::{Cell, Id};

/// A location addressed by ids rather than indexes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellLocation {
    pub row_id: Id,
    pub column_id: Id,
}

impl CellLocation {
    pub fn new(row_id: impl Into<Id>, column_id: impl Into<Id>) -> Self {
        Self {
            row_id: row_id.into(),
            column_id: column_id.into(),
        }
    }
}

/// A single accepted cell edit, queued for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellChange {
    #[serde(rename = "type")]
    pub cell_type: String,
    pub row_id: Id,
    pub column_id: Id,
    pub previous_cell: Cell,
    pub new_cell: Cell,
}

/// A host-requested outline around one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub row_id: Id,
    pub column_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}
