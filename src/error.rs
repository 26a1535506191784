//! Structured error types for cellgrid.
//!
//! Configuration problems fail fast with the offending ids; lookup failures
//! carry the ids that could not be resolved.

/// All errors that can occur while building or driving a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Malformed row/column declarations.
    #[error("Configuration: {0}")]
    Config(String),

    /// A cell declaration without a `type` field.
    #[error("Cell is missing type property (row: '{row_id}', column: '{column_id}')")]
    MissingCellType { row_id: String, column_id: String },

    /// No template registered for a cell type.
    #[error("No cell template for type '{0}'")]
    MissingTemplate(String),

    /// A template rejected the cell declaration.
    #[error("Cell validation failed for type '{cell_type}': {reason}")]
    CellValidation { cell_type: String, reason: String },

    /// Unknown row or column id.
    #[error("column: '{column_id}', row: '{row_id}'")]
    Lookup { row_id: String, column_id: String },

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Clipboard HTML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl GridError {
    pub(crate) fn lookup(row_id: impl ToString, column_id: impl ToString) -> Self {
        Self::Lookup {
            row_id: row_id.to_string(),
            column_id: column_id.to_string(),
        }
    }
}

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_names_both_ids() {
        let err = GridError::lookup("r1", "c9");
        assert_eq!(err.to_string(), "column: 'c9', row: 'r1'");
    }

    #[test]
    fn string_conversion_is_other() {
        let err: GridError = "boom".into();
        assert!(matches!(err, GridError::Other(ref s) if s == "boom"));
    }
}
