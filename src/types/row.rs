use serde::{Deserialize, Serialize};

use super::{Cell, Id};

/// A row declaration as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub row_id: Id,
    pub cells: Vec<Cell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default)]
    pub reorderable: bool,
}

impl Row {
    pub fn new(row_id: impl Into<Id>, cells: Vec<Cell>) -> Self {
        Self {
            row_id: row_id.into(),
            cells,
            height: None,
            reorderable: false,
        }
    }

    #[must_use]
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn reorderable(mut self) -> Self {
        self.reorderable = true;
        self
    }
}

/// A column declaration as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub column_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default)]
    pub resizable: bool,
    #[serde(default)]
    pub reorderable: bool,
}

impl Column {
    pub fn new(column_id: impl Into<Id>) -> Self {
        Self {
            column_id: column_id.into(),
            width: None,
            resizable: false,
            reorderable: false,
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    #[must_use]
    pub fn reorderable(mut self) -> Self {
        self.reorderable = true;
        self
    }
}
