use serde::{Deserialize, Serialize};

/// Presentation hints carried on a cell and passed through to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overflow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Borders>,
}

/// Per-edge border overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Borders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderProps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BorderProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}
