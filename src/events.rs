//! Raw input events as the host delivers them.
//!
//! These are framework-neutral: a host translates its own pointer, keyboard
//! and clipboard events into these before handing them to the grid.

use serde::{Deserialize, Serialize};

/// Width of the column resize grip at the right edge of a header cell, in pixels
pub const RESIZE_HANDLE_WIDTH: f32 = 11.0;

/// Which modifier conventions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerTarget {
    /// A cell body
    #[default]
    Cell,
    ResizeHandle,
    /// The enlarged grip rendered for touch input
    TouchResizeHandle,
    FillHandle,
    TouchFillHandle,
    /// Inert content inside a cell (e.g. an open editor); ignored by selection
    Content,
}

impl PointerTarget {
    pub fn is_fill_handle(self) -> bool {
        matches!(self, Self::FillHandle | Self::TouchFillHandle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// The multi-range selection key: Cmd on macOS, Ctrl elsewhere.
    pub fn selection_key(self, platform: Platform) -> bool {
        match platform {
            Platform::MacOs => self.meta,
            Platform::Other => self.ctrl,
        }
    }

    /// The fill-handle "repeat instead of extrapolate" key: Alt on macOS,
    /// Ctrl elsewhere.
    pub fn preserve_key(self, platform: Platform) -> bool {
        match platform {
            Platform::MacOs => self.alt,
            Platform::Other => self.ctrl,
        }
    }
}

/// A pointer (mouse/touch/pen) event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
    #[serde(default)]
    pub pointer_type: PointerType,
    #[serde(default)]
    pub target: PointerTarget,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn at(client_x: f32, client_y: f32) -> Self {
        Self {
            client_x,
            client_y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn on(mut self, target: PointerTarget) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn touch(mut self) -> Self {
        self.pointer_type = PointerType::Touch;
        self
    }

    pub fn on_resize_handle(&self) -> bool {
        match self.pointer_type {
            PointerType::Touch => matches!(
                self.target,
                PointerTarget::ResizeHandle | PointerTarget::TouchResizeHandle
            ),
            PointerType::Mouse | PointerType::Pen => self.target == PointerTarget::ResizeHandle,
        }
    }

    pub fn on_fill_handle(&self) -> bool {
        match self.pointer_type {
            PointerType::Touch => self.target.is_fill_handle(),
            PointerType::Mouse | PointerType::Pen => self.target == PointerTarget::FillHandle,
        }
    }
}

/// Logical keys the grid reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    Enter,
    Escape,
    Backspace,
    Delete,
    Space,
    F2,
    /// A printable character
    Char(char),
    Other(String),
}

impl Key {
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ArrowUp
                | Self::ArrowDown
                | Self::ArrowLeft
                | Self::ArrowRight
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
                | Self::Tab
                | Self::Enter
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub fn with(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    #[must_use]
    pub fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_key_depends_on_platform() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert!(ctrl.selection_key(Platform::Other));
        assert!(!ctrl.selection_key(Platform::MacOs));
        assert!(ctrl.preserve_key(Platform::Other));
    }

    #[test]
    fn touch_accepts_either_grip() {
        let ev = PointerEvent::at(0.0, 0.0).on(PointerTarget::ResizeHandle).touch();
        assert!(ev.on_resize_handle());
        let mouse = PointerEvent::at(0.0, 0.0).on(PointerTarget::TouchResizeHandle);
        assert!(!mouse.on_resize_handle());
    }
}
