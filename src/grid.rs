//! The `Grid` handle: owns the interaction state and routes raw input
//! through the current behavior.
//!
//! Hosts feed pointer, keyboard and clipboard events in client coordinates
//! and read the resulting state back. After every event accepted cell
//! changes are handed to [`GridHost::on_cells_changed`] and, if focus moved,
//! [`GridState::scroll_target`] holds the scroll offsets that reveal it.

use crate::behavior::GridEvent;
use crate::clipboard::{self, ClipboardData};
use crate::config::GridProps;
use crate::error::Result;
use crate::events::{KeyEvent, PointerEvent};
use crate::layout::{
    location_from_client, recalc_visible_range, scroll_into_view, Location, PointerLocation, Viewport,
};
use crate::state::{apply_props, prepare_matrix, Context, GridState};
use crate::templates::CellTemplates;

pub use crate::host::GridHost;

pub struct Grid<H: GridHost, V: crate::layout::ViewportQuery = Viewport> {
    props: GridProps,
    state: GridState,
    host: H,
    viewport: V,
    /// Cell under the pointer during a gesture, for enter detection
    last_pointer: Option<PointerLocation>,
}

impl<H: GridHost, V: crate::layout::ViewportQuery> Grid<H, V> {
    /// Build a grid with the default cell templates.
    ///
    /// # Errors
    /// Configuration errors from the declaration (see [`crate::GridError`]).
    pub fn new(props: GridProps, host: H, viewport: V) -> Result<Self> {
        Self::with_templates(props, CellTemplates::with_defaults(), host, viewport)
    }

    /// # Errors
    /// Configuration errors from the declaration or template validation.
    pub fn with_templates(props: GridProps, templates: CellTemplates, mut host: H, viewport: V) -> Result<Self> {
        let mut cx = Context {
            host: &mut host,
            viewport: &viewport,
        };
        let prepared = prepare_matrix(&props, &templates, &cx)?;
        let state = apply_props(&props, None, prepared, templates, &mut cx);
        let mut grid = Self {
            props,
            state,
            host,
            viewport,
            last_pointer: None,
        };
        grid.settle(None);
        Ok(grid)
    }

    /// Replace the declaration. Selection and focus carry over where they
    /// still resolve.
    ///
    /// # Errors
    /// Configuration errors; the grid keeps its previous state.
    pub fn set_props(&mut self, props: GridProps) -> Result<()> {
        let templates = self.state.templates.clone();
        let prepared = {
            let cx = Context {
                host: &mut self.host,
                viewport: &self.viewport,
            };
            prepare_matrix(&props, &templates, &cx)?
        };
        let previous = std::mem::take(&mut self.state);
        let focus_before = previous.focused_location.clone();
        let mut cx = Context {
            host: &mut self.host,
            viewport: &self.viewport,
        };
        self.state = apply_props(&props, Some(previous), prepared, templates, &mut cx);
        self.props = props;
        self.settle(focus_before);
        Ok(())
    }

    /// Register additional or replacement templates and re-derive.
    ///
    /// # Errors
    /// When existing cells fail validation under the new templates.
    pub fn set_templates(&mut self, templates: CellTemplates) -> Result<()> {
        let old = std::mem::replace(&mut self.state.templates, templates);
        let props = self.props.clone();
        self.set_props(props).inspect_err(|_| self.state.templates = old)
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) {
        let Some(location) = self.resolve(event) else {
            return;
        };
        self.dispatch(GridEvent::PointerDown(event, &location));
        self.last_pointer = Some(location);
    }

    /// Pointer moved. Outside a gesture this is a no-op; during one the
    /// behavior sees every move plus an enter whenever the cell changes.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        if self.state.behavior.is_default() {
            return;
        }
        let Some(location) = self.resolve(event) else {
            return;
        };
        self.dispatch(GridEvent::PointerMove(event, &location));
        let entered = self
            .last_pointer
            .as_ref()
            .map_or(true, |last| !last.location().same_cell(&location.location()));
        if entered {
            self.dispatch(GridEvent::PointerEnter(event, &location));
        }
        self.last_pointer = Some(location);
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) {
        let location = self.resolve(event).or_else(|| self.last_pointer.take());
        if let Some(location) = location {
            self.dispatch(GridEvent::PointerUp(event, &location));
        }
        self.last_pointer = None;
    }

    pub fn double_click(&mut self, event: &PointerEvent) {
        if let Some(location) = self.resolve(event) {
            self.dispatch(GridEvent::DoubleClick(event, &location.location()));
        }
    }

    pub fn context_menu(&mut self, event: &PointerEvent) {
        self.dispatch(GridEvent::ContextMenu(event));
    }

    pub fn key_down(&mut self, event: &KeyEvent) {
        self.dispatch(GridEvent::KeyDown(event));
    }

    pub fn key_up(&mut self, event: &KeyEvent) {
        self.dispatch(GridEvent::KeyUp(event));
    }

    pub fn composition_end(&mut self, text: &str) {
        self.dispatch(GridEvent::CompositionEnd(text));
    }

    /// Clipboard payload for the active range. `None` mid-gesture or with
    /// nothing selected.
    pub fn copy(&mut self) -> Option<ClipboardData> {
        if !self.state.behavior.is_default() {
            return None;
        }
        let (state, data) = clipboard::copy(std::mem::take(&mut self.state));
        self.state = state;
        data
    }

    pub fn cut(&mut self) -> Option<ClipboardData> {
        if !self.state.behavior.is_default() {
            return None;
        }
        let (state, data) = clipboard::cut(std::mem::take(&mut self.state));
        self.state = state;
        self.settle(None);
        data
    }

    pub fn paste(&mut self, data: &ClipboardData) {
        if !self.state.behavior.is_default() {
            return;
        }
        let state = std::mem::take(&mut self.state);
        let mut cx = Context {
            host: &mut self.host,
            viewport: &self.viewport,
        };
        self.state = clipboard::paste(state, data, &mut cx);
        // pasting past the edge grows the matrix
        self.recalc_visible_range();
        self.settle(None);
    }

    /// The host scrolled or resized the viewport. The visible range is only
    /// recomputed once the scroll position leaves its boundaries.
    pub fn on_scroll(&mut self) {
        let (left, top) = self.viewport.scroll_offset();
        if self.state.scroll_boundaries.crossed(left, top) {
            self.recalc_visible_range();
        }
    }

    pub fn recalc_visible_range(&mut self) {
        let visible = recalc_visible_range(&self.state.matrix, &self.viewport, self.state.disable_virtual_scrolling);
        tracing::debug!(
            rows = visible.range.rows.len(),
            columns = visible.range.columns.len(),
            "visible range recalculated"
        );
        self.state.visible_range = visible.range;
        self.state.scroll_boundaries = visible.boundaries;
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn props(&self) -> &GridProps {
        &self.props
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutate the viewport (resize, re-measure), then recompute the visible
    /// range.
    pub fn update_viewport(&mut self, f: impl FnOnce(&mut V)) {
        f(&mut self.viewport);
        self.recalc_visible_range();
    }

    pub fn into_parts(self) -> (GridProps, H, V) {
        (self.props, self.host, self.viewport)
    }

    fn resolve(&self, event: &PointerEvent) -> Option<PointerLocation> {
        location_from_client(
            &self.state.matrix,
            &self.viewport,
            event.client_x,
            event.client_y,
            self.state.behavior.favor_scroll(),
        )
    }

    fn dispatch(&mut self, event: GridEvent<'_>) {
        let mut state = std::mem::take(&mut self.state);
        let behavior = std::mem::take(&mut state.behavior);
        let focus_before = state.focused_location.clone();
        let mut cx = Context {
            host: &mut self.host,
            viewport: &self.viewport,
        };
        let (next, mut state) = behavior.handle(event, state, &mut cx);
        state.behavior = next;
        self.state = state;
        self.settle(focus_before);
    }

    /// Flush queued changes to the host and work out whether the newly
    /// focused cell needs scrolling into view.
    fn settle(&mut self, focus_before: Option<Location>) {
        let changes = self.state.drain_changes();
        if !changes.is_empty() {
            self.host.on_cells_changed(&changes);
        }

        let moved = match (&focus_before, &self.state.focused_location) {
            (Some(before), Some(now)) => !before.same_cell(now),
            (None, Some(_)) => true,
            _ => false,
        };
        if moved {
            self.state.scroll_target = self.state.focused_location.as_ref().and_then(|focused| {
                let target = scroll_into_view(&self.state.matrix, &self.viewport, focused);
                let current = self.viewport.scroll_offset();
                let unchanged = (target.0 - current.0).abs() < f32::EPSILON && (target.1 - current.1).abs() < f32::EPSILON;
                (!unchanged).then_some(target)
            });
        }
    }
}

impl<H: GridHost> Grid<H, Viewport> {
    /// Scroll the owned viewport.
    pub fn scroll_to(&mut self, scroll_x: f32, scroll_y: f32) {
        self.viewport.scroll_to(scroll_x, scroll_y);
        self.viewport.clamp_scroll(&self.state.matrix);
        self.on_scroll();
    }

    /// Apply a pending scroll-into-view target.
    pub fn follow_focus(&mut self) {
        if let Some((x, y)) = self.state.scroll_target.take() {
            self.scroll_to(x, y);
        }
    }
}
