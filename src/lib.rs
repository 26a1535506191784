//! cellgrid - spreadsheet grid engine
//!
//! The geometry and interaction core of a spreadsheet-like grid widget:
//! - Cell matrix: pixel geometry for rows and columns, sticky (frozen) bands, spans
//! - Pointer resolution across sticky panes with binary search
//! - Virtualized visible range during scroll
//! - Selection, focus, keyboard navigation and cell editing through templates
//! - Fill handle with linear-regression value prediction
//! - Column resize, row/column reorder, copy/cut/paste
//!
//! Rendering is left to the host. The host owns a [`Grid`], feeds it input
//! events in client coordinates and reacts to [`GridHost`] callbacks.
//!
//! # Usage
//!
//! ```no_run
//! use cellgrid::{Cell, Column, Grid, GridProps, PointerEvent, Row, Viewport};
//!
//! let props = GridProps::new(
//!     vec![Row::new("r0", vec![Cell::text("a"), Cell::number(1.0)])],
//!     vec![Column::new("name"), Column::new("qty")],
//! );
//! let mut grid = Grid::new(props, (), Viewport::new(800.0, 600.0))?;
//! grid.pointer_down(&PointerEvent::at(10.0, 10.0));
//! grid.pointer_up(&PointerEvent::at(10.0, 10.0));
//! # Ok::<(), cellgrid::GridError>(())
//! ```

pub mod behavior;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod host;
pub mod layout;
pub mod state;
pub mod summary;
pub mod templates;
pub mod types;

use wasm_bindgen::prelude::*;

pub use behavior::{Behavior, GridEvent};
pub use clipboard::ClipboardData;
pub use config::GridProps;
pub use error::{GridError, Result};
pub use events::{Key, KeyEvent, Modifiers, Platform, PointerEvent, PointerTarget, PointerType};
pub use grid::{Grid, GridHost};
pub use layout::{CellMatrix, Location, PointerLocation, Range, Viewport, ViewportQuery};
pub use state::GridState;
pub use summary::LayoutSummary;
pub use templates::{CellTemplate, CellTemplates};
pub use types::*;

/// Compute the layout summary for a JSON grid declaration and return it as
/// a JSON string.
///
/// # Errors
/// Returns an error if the declaration is malformed or fails validation.
#[wasm_bindgen]
pub fn layout_json(json: &str) -> std::result::Result<String, JsValue> {
    let summary = summary::layout_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&summary).map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Like [`layout_json`], but returns the summary as a `JsValue`.
///
/// # Errors
/// Returns an error if the declaration is malformed or fails validation.
#[wasm_bindgen]
pub fn layout_js(json: &str) -> std::result::Result<JsValue, JsValue> {
    let summary = summary::layout_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&summary).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
