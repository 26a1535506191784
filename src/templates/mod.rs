//! Cell templates: per-type behavior for validation, editing and keys.
//!
//! The engine never interprets a cell beyond `text`/`value`; everything
//! type-specific goes through the [`CellTemplate`] registered for the
//! cell's `type`.

mod checkbox;
mod header;
mod number;
mod text;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use checkbox::CheckboxCellTemplate;
pub use header::HeaderCellTemplate;
pub use number::NumberCellTemplate;
pub use text::TextCellTemplate;

use crate::error::{GridError, Result};
use crate::events::KeyEvent;
use crate::types::{Cell, CellStyle};

/// What a template decided to do with a key press.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyOutcome {
    pub cell: Cell,
    pub enable_edit_mode: bool,
}

impl KeyOutcome {
    pub fn unchanged(cell: &Cell) -> Self {
        Self {
            cell: cell.clone(),
            enable_edit_mode: false,
        }
    }
}

/// Behavior of one cell type.
pub trait CellTemplate: Send + Sync {
    /// Validate a declared cell and normalize it into this type.
    ///
    /// # Errors
    /// [`GridError::CellValidation`] when the declaration can't be used.
    fn get_compatible_cell(&self, cell: &Cell) -> Result<Cell>;

    /// Merge an incoming cell (from paste, fill or an editor) into `cell`.
    /// `None` means the type is read-only.
    fn update(&self, _cell: &Cell, _incoming: &Cell) -> Option<Cell> {
        None
    }

    fn is_focusable(&self, _cell: &Cell) -> bool {
        true
    }

    fn handle_key_down(&self, cell: &Cell, _event: &KeyEvent) -> KeyOutcome {
        KeyOutcome::unchanged(cell)
    }

    /// IME composition finished with `text`.
    fn handle_composition_end(&self, cell: &Cell, _text: &str) -> KeyOutcome {
        KeyOutcome::unchanged(cell)
    }

    fn style(&self, cell: &Cell, _is_in_edit_mode: bool) -> Option<CellStyle> {
        cell.style.clone()
    }

    fn class_name(&self, cell: &Cell, _is_in_edit_mode: bool) -> Option<String> {
        cell.class_name.clone()
    }
}

/// Registry of templates keyed by cell type name.
#[derive(Clone)]
pub struct CellTemplates {
    templates: HashMap<String, Arc<dyn CellTemplate>>,
}

impl fmt::Debug for CellTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.templates.keys().collect();
        names.sort();
        f.debug_struct("CellTemplates").field("types", &names).finish()
    }
}

impl Default for CellTemplates {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CellTemplates {
    /// No templates at all.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// `text`, `number`, `header` and `checkbox`.
    pub fn with_defaults() -> Self {
        let mut templates = Self::empty();
        templates.register("text", TextCellTemplate);
        templates.register("number", NumberCellTemplate);
        templates.register("header", HeaderCellTemplate);
        templates.register("checkbox", CheckboxCellTemplate);
        templates
    }

    /// Register (or replace) the template for `cell_type`.
    pub fn register<T: CellTemplate + 'static>(&mut self, cell_type: impl Into<String>, template: T) {
        self.templates.insert(cell_type.into(), Arc::new(template));
    }

    pub fn contains(&self, cell_type: &str) -> bool {
        self.templates.contains_key(cell_type)
    }

    /// # Errors
    /// [`GridError::MissingTemplate`] for unknown types.
    pub fn get(&self, cell_type: &str) -> Result<&dyn CellTemplate> {
        self.templates
            .get(cell_type)
            .map(|t| t.as_ref())
            .ok_or_else(|| GridError::MissingTemplate(cell_type.to_string()))
    }

    /// Resolve a cell's template and normalize the cell through it.
    ///
    /// # Errors
    /// Missing type, missing template, or template validation failure.
    pub fn compatible(&self, cell: &Cell) -> Result<(Cell, &dyn CellTemplate)> {
        if cell.cell_type.is_empty() {
            return Err(GridError::CellValidation {
                cell_type: String::new(),
                reason: "cell is missing type property".into(),
            });
        }
        let template = self.get(&cell.cell_type)?;
        Ok((template.get_compatible_cell(cell)?, template))
    }
}

/// Typing a printable character without Ctrl/Alt/Meta starts editing with
/// that character; Enter and F2 start editing with the current content.
pub(crate) fn begin_edit_on_key(cell: &Cell, event: &KeyEvent, accepts: impl Fn(char) -> bool) -> KeyOutcome {
    use crate::events::Key;
    let m = event.modifiers;
    match &event.key {
        Key::Char(ch) if !m.ctrl && !m.alt && !m.meta && accepts(*ch) => KeyOutcome {
            cell: Cell {
                text: ch.to_string(),
                value: crate::types::parse_number(&ch.to_string()),
                ..cell.clone()
            },
            enable_edit_mode: true,
        },
        Key::Enter | Key::F2 => KeyOutcome {
            cell: cell.clone(),
            enable_edit_mode: true,
        },
        _ => KeyOutcome::unchanged(cell),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_registered() {
        let t = CellTemplates::with_defaults();
        for name in ["text", "number", "header", "checkbox"] {
            assert!(t.contains(name), "{name}");
        }
    }

    #[test]
    fn unknown_type_is_missing_template() {
        let t = CellTemplates::with_defaults();
        let err = t.compatible(&Cell::with_type("date")).err().unwrap();
        assert!(matches!(err, GridError::MissingTemplate(ref name) if name == "date"));
    }

    #[test]
    fn custom_template_replaces_default() {
        struct Upper;
        impl CellTemplate for Upper {
            fn get_compatible_cell(&self, cell: &Cell) -> Result<Cell> {
                Ok(Cell {
                    text: cell.text.to_uppercase(),
                    ..cell.clone()
                })
            }
        }
        let mut t = CellTemplates::with_defaults();
        t.register("text", Upper);
        let (cell, template) = t.compatible(&Cell::text("abc")).unwrap();
        assert_eq!(cell.text, "ABC");
        assert!(template.update(&cell, &cell).is_none());
    }
}
