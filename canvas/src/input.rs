//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `UiState` is the board-level interaction mode the renderer needs to see
//! (connection mode, the pending yarn source, the card being edited).
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up, carrying the context needed to compute deltas and emit the
//! final board mutation on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ItemRef;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Escape"`, `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down = zoom out).
    pub dy: f64,
}

/// Persistent interaction state visible to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Clicks on cards pick yarn endpoints instead of opening editors.
    pub connection_mode: bool,
    /// First endpoint chosen in connection mode, waiting for the second.
    pub pending_source: Option<ItemRef>,
    /// Card whose editor the host has open.
    pub editing: Option<ItemRef>,
}

/// What a drag gesture moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Item(ItemRef),
    Mascot(String),
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging the empty board to pan the camera.
    Panning {
        /// Screen position of the previous pointer event.
        last_screen: Point,
    },
    /// Pointer went down on a card or mascot. Becomes an actual drag once it
    /// travels past the activation distance; otherwise the release is a click.
    Dragging {
        target: DragTarget,
        /// Screen position of the pointer-down.
        start_screen: Point,
        /// Screen position of the latest pointer event.
        last_screen: Point,
        /// Whether the activation distance has been crossed.
        active: bool,
    },
    /// Recording a freehand stroke on the drawing target.
    Stroking { item: ItemRef },
    /// Dragging the mascot's resize grip.
    ResizingMascot {
        id: String,
        start_screen: Point,
        orig_width: f64,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
