use serde::{Deserialize, Serialize};

/// What kind of thing the current selection is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Standard cell ranges (default)
    #[default]
    Range,
    /// Entire row(s) selected
    Row,
    /// Entire column(s) selected
    Column,
}

/// Where moved rows/columns land relative to the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    On,
    After,
}

/// An entry of the context menu. The host reacts to the chosen `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    pub id: String,
    pub label: String,
}

impl MenuOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Copy, cut and paste; the seed list handed to the host.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("copy", "Copy"),
            Self::new("cut", "Cut"),
            Self::new("paste", "Paste"),
        ]
    }
}
